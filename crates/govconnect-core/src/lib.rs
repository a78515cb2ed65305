//! Core domain logic for the GovConnect gateway.
//!
//! Everything in this crate is pure and synchronous: intent-to-route
//! mapping, complaint drafting and placeholder refinement, the sector
//! access-key registry, reference codes, and the localized string catalog.
//! Network calls live in the gateway binary, not here.

pub mod composer;
pub mod draft;
pub mod intent;
pub mod locale;
pub mod reference;
pub mod refine;
pub mod sectors;

pub use composer::{Composer, ComposerError, ComposerStatus, SubmissionRecord, DEFAULT_SENDER_EMAIL};
pub use draft::{full_description, ComplaintDraft, DEFAULT_PORTAL};
pub use intent::{generic_acknowledgment, Intent, IntentResult, RouteDecision};
pub use locale::{Catalog, Language};
pub use reference::reference_number;
pub use refine::{full_address, refine_body, ContactDetails, DEFAULT_SIGNATORY};
pub use sectors::{access_key, department, DEFAULT_ACCESS_KEY, SECTORS};
