//! Third-party email relay client.
//!
//! Complaints are delivered to departments through a form-to-email relay:
//! a multipart POST carrying the sector's access key plus the citizen's
//! contact details and the refined letter body.

use reqwest::multipart::Form;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("relay rejected submission: {0}")]
    Rejected(String),
}

/// Fields posted to the relay for one complaint.
#[derive(Debug, Clone)]
pub struct RelaySubmission {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

pub struct RelayClient {
    client: reqwest::Client,
    url: String,
}

impl RelayClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    /// Send one complaint. A 2xx response with `success: false` is still a
    /// rejection; the caller decides whether the draft stays retryable.
    pub async fn send(&self, submission: RelaySubmission) -> Result<String, RelayError> {
        let form = Form::new()
            .text("access_key", submission.access_key)
            .text("name", submission.name)
            .text("email", submission.email)
            .text("subject", submission.subject)
            .text("message", submission.message);

        let resp = self.client.post(&self.url).multipart(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RelayResponse = resp.json().await?;
        if !parsed.success {
            return Err(RelayError::Rejected(parsed.message));
        }

        info!("complaint relayed to department inbox");
        Ok(parsed.message)
    }
}
