//! Complaint drafts and the local fallback template.

use serde::{Deserialize, Serialize};

use crate::sectors;

/// National grievance portal, used when the generator suggests none.
pub const DEFAULT_PORTAL: &str = "https://pgportal.gov.in/";

/// A generated complaint letter. The body may contain placeholder tokens;
/// refinement produces the display text without mutating the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub subject: String,
    pub body: String,
    pub department: String,
    pub portal: String,
}

impl ComplaintDraft {
    /// Assemble a draft from the generation service's response, filling the
    /// optional fields the service may omit.
    pub fn from_generated(
        sector: &str,
        subject: String,
        body: String,
        department: Option<String>,
        portal: Option<String>,
    ) -> Self {
        Self {
            subject,
            body,
            department: department.unwrap_or_else(|| sectors::department(sector)),
            portal: portal.unwrap_or_else(|| DEFAULT_PORTAL.to_string()),
        }
    }

    /// Fixed local template used when generation fails. This is the terminal
    /// error-recovery path: it cannot fail, and the flow continues with it
    /// as if the generator had answered.
    pub fn fallback(sector: &str, description: &str) -> Self {
        Self {
            subject: format!("Complaint Regarding {sector} Service Issue"),
            body: format!(
                "Respected Sir/Madam,\n\n{description}\n\nI request you to kindly look into this matter urgently.\n\nYours faithfully,\n[Your Name]"
            ),
            department: sectors::department(sector),
            portal: DEFAULT_PORTAL.to_string(),
        }
    }
}

/// Prefix the issue location onto the description before it is sent to the
/// generation service, so the letter mentions where the problem is.
pub fn full_description(location: &str, pincode: &str, description: &str) -> String {
    format!("Location of Issue: {location}, Pincode: {pincode}\n\nDetails: {description}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fallback_subject_and_body() {
        let draft = ComplaintDraft::fallback("GHMC", "Streetlight broken");
        assert_eq!(draft.subject, "Complaint Regarding GHMC Service Issue");
        assert!(draft.body.contains("Streetlight broken"));
        assert!(draft.body.contains("[Your Name]"));
        assert_eq!(draft.department, "Department of GHMC");
        assert_eq!(draft.portal, DEFAULT_PORTAL);
    }

    #[test]
    fn generated_draft_fills_missing_optionals() {
        let draft = ComplaintDraft::from_generated(
            "Electricity",
            "Power outage".into(),
            "Respected Sir/Madam,".into(),
            None,
            None,
        );
        assert_eq!(draft.department, "Department of Electricity");
        assert_eq!(draft.portal, DEFAULT_PORTAL);
    }

    #[test]
    fn generated_draft_keeps_supplied_optionals() {
        let draft = ComplaintDraft::from_generated(
            "Electricity",
            "s".into(),
            "b".into(),
            Some("TSSPDCL".into()),
            Some("https://tgsouthernpower.org/".into()),
        );
        assert_eq!(draft.department, "TSSPDCL");
        assert_eq!(draft.portal, "https://tgsouthernpower.org/");
    }

    #[test]
    fn description_prefix_format() {
        let full = full_description("MG Road", "500003", "Potholes everywhere");
        assert_eq!(
            full,
            "Location of Issue: MG Road, Pincode: 500003\n\nDetails: Potholes everywhere"
        );
    }
}
