//! HTTP download of the published holdings file.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::TransportError;
use fundwatch_core::errors::Result;
use fundwatch_core::holdings::HoldingsFeedTrait;

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the holdings CSV from a fixed URL.
pub struct HttpHoldingsFeed {
    client: Client,
    url: String,
}

impl HttpHoldingsFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fundwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    async fn download(&self) -> std::result::Result<Vec<u8>, TransportError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), self.url);
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl HoldingsFeedTrait for HttpHoldingsFeed {
    fn source_url(&self) -> &str {
        &self.url
    }

    async fn fetch_csv(&self) -> Result<Vec<u8>> {
        self.download().await.map_err(TransportError::into_feed_error)
    }
}
