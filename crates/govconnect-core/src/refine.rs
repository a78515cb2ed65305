//! Placeholder refinement for generated complaint drafts.
//!
//! Draft bodies arrive containing bracketed tokens such as `[Your Name]` or
//! `[Contact Information]`. Refinement either substitutes each token with
//! the citizen's details or strips it (together with one preceding line
//! break, so no blank line is left behind). The pass is pure and idempotent:
//! text without tokens passes through unchanged.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

/// Signatory used when the citizen leaves the name field blank.
pub const DEFAULT_SIGNATORY: &str = "Responsible Citizen";

lazy_static! {
    static ref NAME_TOKEN: Regex = Regex::new(r"(?i)\[(?:Your )?Name\]").unwrap();
    static ref CONTACT_TOKEN: Regex = Regex::new(r"(?i)\[(?:Your )?Contact Information\]").unwrap();
    // Removal variants consume one preceding line break, covering literal
    // newlines and the escaped two-character "\n" some generators emit.
    static ref CONTACT_LINE: Regex =
        Regex::new(r"(?i)(?:\r\n|\n|\\n)\[(?:Your )?Contact Information\]").unwrap();
    static ref ADDRESS_TOKEN: Regex = Regex::new(r"(?i)\[(?:Your )?Address\]").unwrap();
    static ref ADDRESS_LINE: Regex =
        Regex::new(r"(?i)(?:\r\n|\n|\\n)\[(?:Your )?Address\]").unwrap();
}

/// Contact details supplied by the citizen at refinement time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub location: String,
    pub pincode: String,
}

/// Comma-join of the non-blank address parts.
pub fn full_address(location: &str, pincode: &str) -> String {
    [location.trim(), pincode.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Substitute or strip every recognized placeholder token.
///
/// Name substitution always happens (blank names become
/// [`DEFAULT_SIGNATORY`]); contact and address tokens are substituted when
/// the corresponding field is present and removed otherwise.
pub fn refine_body(body: &str, details: &ContactDetails) -> String {
    let name = details.name.trim();
    let signed_name = if name.is_empty() { DEFAULT_SIGNATORY } else { name };
    let mut body = NAME_TOKEN.replace_all(body, NoExpand(signed_name)).into_owned();

    let email = details.email.trim();
    body = if email.is_empty() {
        let stripped = CONTACT_LINE.replace_all(&body, "");
        CONTACT_TOKEN.replace_all(&stripped, "").into_owned()
    } else {
        CONTACT_TOKEN.replace_all(&body, NoExpand(email)).into_owned()
    };

    let address = full_address(&details.location, &details.pincode);
    if address.is_empty() {
        let stripped = ADDRESS_LINE.replace_all(&body, "");
        ADDRESS_TOKEN.replace_all(&stripped, "").into_owned()
    } else {
        ADDRESS_TOKEN.replace_all(&body, NoExpand(&address)).into_owned()
    }
}
