//! Request/response bodies for the GovConnect API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use govconnect_core::{ComplaintDraft, ComposerStatus, Language, RouteDecision};

// ---------- Assistant ----------

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(alias = "text")]
    pub message: String,
    /// Display language tag ("en", "hi", "te"); unknown tags mean English.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    /// Classifier tag, absent when classification was unavailable.
    pub intent: Option<String>,
    #[serde(flatten)]
    pub decision: RouteDecision,
    pub entities: Vec<Value>,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StringsQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistantStrings {
    pub greeting: &'static str,
    pub cleared: &'static str,
    pub unavailable: &'static str,
}

// ---------- Complaints ----------

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub sector: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub pincode: String,
    /// Language the letter should be drafted in; defaults to English.
    #[serde(default)]
    pub language: Language,
}

/// Generation service response; the wire format uses camelCase fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDraft {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub suggested_department: Option<String>,
    #[serde(default)]
    pub official_portal: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub draft: ComplaintDraft,
    /// True when the local template stood in for the generation service.
    pub fallback: bool,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub body: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub pincode: String,
}

#[derive(Debug, Serialize)]
pub struct RefineResponse {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub sector: String,
    pub description: String,
    /// Draft body, placeholder tokens included; refined before sending.
    pub body: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub pincode: String,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub success: bool,
    pub reference_number: String,
    pub department: String,
    pub status: ComposerStatus,
}

#[derive(Debug, Serialize)]
pub struct SectorsResponse {
    pub sectors: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub sector: String,
    pub body: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub pincode: String,
    /// Optional evidence image (PNG or JPEG), base64-encoded.
    #[serde(default)]
    pub attachment_base64: Option<String>,
}

// ---------- Locator and process tracking ----------

#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    #[serde(alias = "processType")]
    pub process_type: String,
}
