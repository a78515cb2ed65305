//! Shared application state.

use anyhow::Result;

use govconnect_core::Catalog;

use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::relay::RelayClient;

pub struct AppState {
    pub backend: BackendClient,
    pub relay: RelayClient,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let backend = BackendClient::new(
            client.clone(),
            config.backend_base_url,
            config.backend_retries,
            config.retry_delay,
        );
        let relay = RelayClient::new(client, config.relay_url);

        Ok(Self {
            backend,
            relay,
            catalog: Catalog::govconnect(),
        })
    }
}
