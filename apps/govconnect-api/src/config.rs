//! Environment-driven configuration.

use std::time::Duration;

const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_RELAY_URL: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the classifier/services backend, no trailing slash.
    pub backend_base_url: String,
    /// Submission endpoint of the third-party email relay.
    pub relay_url: String,
    pub request_timeout: Duration,
    /// Extra attempts after the first failed backend request.
    pub backend_retries: u32,
    pub retry_delay: Duration,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let backend_base_url = std::env::var("BACKEND_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let relay_url =
            std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());

        let request_timeout = Duration::from_secs(
            std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        );

        let backend_retries = std::env::var("BACKEND_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3100);

        Self {
            backend_base_url,
            relay_url,
            request_timeout,
            backend_retries,
            retry_delay: Duration::from_secs(1),
            port,
        }
    }
}
