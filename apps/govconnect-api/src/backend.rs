//! HTTP client for the classifier/services backend.
//!
//! All calls share one retry policy: transient failures (network errors,
//! timeouts, 5xx and 429 responses) are retried a fixed number of times with
//! a flat delay; any other non-success status is returned as-is.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use govconnect_core::IntentResult;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl BackendError {
    fn is_transient(&self) -> bool {
        match self {
            BackendError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            BackendError::Status { status, .. } => *status >= 500 || *status == 429,
        }
    }
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    retries: u32,
    retry_delay: Duration,
}

impl BackendClient {
    /// `base_url` should be like `http://localhost:8000` (no trailing slash).
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retries,
            retry_delay,
        }
    }

    /// Classify free text into a service intent.
    pub async fn classify_intent(&self, text: &str) -> Result<IntentResult, BackendError> {
        let value = self
            .post_json("/api/intent", &serde_json::json!({ "text": text }))
            .await?;
        let result: IntentResult = serde_json::from_value(value)
            .map_err(|e| BackendError::Status {
                status: 502,
                body: format!("malformed intent response: {e}"),
            })?;
        info!(intent = %result.intent, confidence = result.confidence, "classified intent");
        Ok(result)
    }

    /// Ask the backend to draft a complaint letter body.
    pub async fn generate_complaint(&self, payload: &Value) -> Result<Value, BackendError> {
        self.post_json("/api/complaints/generate", payload).await
    }

    /// Resolve coordinates to a human-readable address.
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Value, BackendError> {
        self.get_json(&format!("/api/locator/reverse?lat={lat}&lng={lng}"))
            .await
    }

    /// GET a backend path (with query string) and parse the JSON body.
    pub async fn get_json(&self, path_and_query: &str) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        self.with_retries(|| {
            let client = self.client.clone();
            let url = url.clone();
            async move { Self::read_json(client.get(&url).send().await?).await }
        })
        .await
    }

    /// POST a JSON body to a backend path and parse the JSON response.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        self.with_retries(|| {
            let client = self.client.clone();
            let url = url.clone();
            let body = body.clone();
            async move { Self::read_json(client.post(&url).json(&body).send().await?).await }
        })
        .await
    }

    /// POST a raw body (file uploads) to a backend path, preserving the
    /// caller's content type, and parse the JSON response.
    pub async fn post_bytes(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: axum::body::Bytes,
    ) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        self.with_retries(|| {
            let client = self.client.clone();
            let url = url.clone();
            let body = body.clone();
            let content_type = content_type.map(str::to_string);
            async move {
                let mut request = client.post(&url).body(body);
                if let Some(ct) = content_type {
                    request = request.header("Content-Type", ct);
                }
                Self::read_json(request.send().await?).await
            }
        })
        .await
    }

    async fn read_json(resp: reqwest::Response) -> Result<Value, BackendError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }

    async fn with_retries<F, Fut>(&self, attempt: F) -> Result<Value, BackendError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<Value, BackendError>>,
    {
        let mut tries_left = self.retries;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && tries_left > 0 => {
                    warn!(error = %e, tries_left, "backend request failed, retrying");
                    tries_left -= 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
