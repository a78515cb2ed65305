//! Intent classification results and destination routing.
//!
//! The classifier itself is an external service; this module only maps its
//! wire tags to destination pages and acknowledgment messages.

use serde::{Deserialize, Serialize};

/// Route used whenever a query cannot be placed more precisely.
pub const FALLBACK_ROUTE: &str = "/schemes";

/// Classified purpose of a free-text citizen query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Scheme,
    Form,
    Complaint,
    Process,
    ServiceLocator,
    LifeEvent,
}

impl Intent {
    /// Parse the classifier's wire tag. Case-sensitive; unknown tags yield
    /// `None` and callers fall back to [`FALLBACK_ROUTE`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "scheme" => Some(Intent::Scheme),
            "form" => Some(Intent::Form),
            "complaint" => Some(Intent::Complaint),
            "process" => Some(Intent::Process),
            "service_locator" => Some(Intent::ServiceLocator),
            "life_event" => Some(Intent::LifeEvent),
            _ => None,
        }
    }

    /// Destination page for this intent. Life events share the schemes page.
    pub fn route(&self) -> &'static str {
        match self {
            Intent::Scheme | Intent::LifeEvent => "/schemes",
            Intent::Form => "/forms",
            Intent::Complaint => "/complaints",
            Intent::Process => "/process-tracker",
            Intent::ServiceLocator => "/service-locator",
        }
    }

    /// Acknowledgment shown to the user once their query is classified.
    pub fn acknowledgment(&self) -> &'static str {
        match self {
            Intent::Scheme => "I can help you find government schemes! Based on your message, you seem to be looking for government schemes. Go to the Schemes page to explore options that match your profile.",
            Intent::Form => "I can help you understand forms! It seems you need assistance with a government form. Visit the Forms page to get guidance on filling out official documents.",
            Intent::Complaint => "I can help you file a complaint! It looks like you want to raise a grievance. Go to the Complaints page to generate a formally worded complaint.",
            Intent::Process => "I can track processes for you! You seem to be asking about a government process. Visit the Process Tracker to see step-by-step procedures.",
            Intent::ServiceLocator => "I can help you find services! It looks like you're looking for government offices nearby. Visit the Service Locator to find offices in your area.",
            Intent::LifeEvent => "I can guide you through life events! It seems you're going through a major life change. Visit the Life Events page for a complete checklist.",
        }
    }
}

/// Acknowledgment for queries the classifier could not place.
pub fn generic_acknowledgment(text: &str) -> String {
    format!(
        "I understand you're asking about: \"{text}\". I'm here to help with government schemes, forms, complaints, and services. Try asking about a specific topic!"
    )
}

/// Raw classifier response, consumed once and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: String,
    #[serde(default)]
    pub entities: Vec<serde_json::Value>,
    #[serde(default)]
    pub confidence: f64,
}

/// Where to send the user next, with their original query preserved as a
/// `?q=` parameter so the destination page can pick it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub route: &'static str,
    pub target: String,
}

impl RouteDecision {
    /// Decide the destination for a classifier tag. Unknown tags degrade to
    /// the schemes page rather than blocking the user.
    pub fn for_tag(tag: &str, original_text: &str) -> Self {
        let route = Intent::from_tag(tag)
            .map(|intent| intent.route())
            .unwrap_or(FALLBACK_ROUTE);
        Self::new(route, original_text)
    }

    /// Destination used when classification itself failed.
    pub fn fallback(original_text: &str) -> Self {
        Self::new(FALLBACK_ROUTE, original_text)
    }

    fn new(route: &'static str, original_text: &str) -> Self {
        let encoded: String = url::form_urlencoded::byte_serialize(original_text.as_bytes()).collect();
        Self {
            route,
            target: format!("{route}?q={encoded}"),
        }
    }
}
