//! Complaint composer lifecycle.
//!
//! A composer is request-scoped and client-held: it owns the form fields and
//! the generated draft for one complaint, and walks the linear lifecycle
//! `Drafting -> Generated -> (Sent | Failed)`. A failed submission keeps the
//! draft so the citizen can retry; nothing here is ever persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::ComplaintDraft;
use crate::reference::reference_number;
use crate::refine::{refine_body, ContactDetails, DEFAULT_SIGNATORY};

/// Sender address used when the citizen leaves the email field blank.
pub const DEFAULT_SENDER_EMAIL: &str = "responsiblecitizen@gmail.com";

/// Lifecycle state of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposerStatus {
    #[default]
    Drafting,
    Generated,
    Sent,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposerError {
    #[error("no draft has been generated yet")]
    NotGenerated,

    #[error("complaint was already sent")]
    AlreadySent,

    #[error("sector and description must both be provided")]
    MissingInput,
}

/// Ephemeral record produced when a complaint is sent. Discarded with the
/// session; never stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub location: String,
    pub pincode: String,
    pub sector: String,
    pub refined_body: String,
    pub reference_number: String,
}

/// One complaint being assembled.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub sector: String,
    pub description: String,
    pub details: ContactDetails,
    draft: Option<ComplaintDraft>,
    status: ComposerStatus,
}

impl Composer {
    /// Start a composer. Both sector and description must be non-blank
    /// before a draft can be requested.
    pub fn new(sector: impl Into<String>, description: impl Into<String>) -> Result<Self, ComposerError> {
        let sector = sector.into();
        let description = description.into();
        if sector.trim().is_empty() || description.trim().is_empty() {
            return Err(ComposerError::MissingInput);
        }
        Ok(Self {
            sector,
            description,
            ..Self::default()
        })
    }

    pub fn status(&self) -> ComposerStatus {
        self.status
    }

    pub fn draft(&self) -> Option<&ComplaintDraft> {
        self.draft.as_ref()
    }

    /// Store a generated (or fallback) draft: `Drafting -> Generated`.
    /// Regenerating while unsent replaces the draft; a sent complaint is
    /// immutable.
    pub fn set_draft(&mut self, draft: ComplaintDraft) -> Result<(), ComposerError> {
        if self.status == ComposerStatus::Sent {
            return Err(ComposerError::AlreadySent);
        }
        self.draft = Some(draft);
        self.status = ComposerStatus::Generated;
        Ok(())
    }

    /// Refined body from the current field values. Pure: recomputed on every
    /// call, the stored draft is never mutated.
    pub fn refined_body(&self) -> Result<String, ComposerError> {
        let draft = self.draft.as_ref().ok_or(ComposerError::NotGenerated)?;
        Ok(refine_body(&draft.body, &self.details))
    }

    /// `Generated -> Sent` after a successful relay submission; yields the
    /// ephemeral record with blank contact fields defaulted.
    pub fn mark_sent(&mut self, at: DateTime<Utc>) -> Result<SubmissionRecord, ComposerError> {
        if self.status == ComposerStatus::Sent {
            return Err(ComposerError::AlreadySent);
        }
        let refined_body = self.refined_body()?;
        self.status = ComposerStatus::Sent;

        let name = self.details.name.trim();
        let email = self.details.email.trim();
        Ok(SubmissionRecord {
            name: if name.is_empty() { DEFAULT_SIGNATORY.into() } else { name.into() },
            email: if email.is_empty() { DEFAULT_SENDER_EMAIL.into() } else { email.into() },
            location: self.details.location.clone(),
            pincode: self.details.pincode.clone(),
            sector: self.sector.clone(),
            refined_body,
            reference_number: reference_number(at),
        })
    }

    /// `Generated -> Failed`. The draft stays intact; sending again is
    /// allowed, retry is always user-initiated.
    pub fn mark_failed(&mut self) -> Result<(), ComposerError> {
        match self.status {
            ComposerStatus::Sent => Err(ComposerError::AlreadySent),
            ComposerStatus::Drafting => Err(ComposerError::NotGenerated),
            _ => {
                self.status = ComposerStatus::Failed;
                Ok(())
            }
        }
    }
}
