//! Transport error types and their conversion into core errors.

use fundwatch_core::errors::{Error, NotificationError};
use thiserror::Error;

/// Errors raised while talking to the feed host or the chat API.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Slack answered `ok: false`.
    #[error("Slack API error: {0}")]
    Slack(String),

    #[error("Response could not be decoded: {0}")]
    Decode(String),
}

impl TransportError {
    /// As a failure to download the holdings file.
    pub fn into_feed_error(self) -> Error {
        Error::Feed(self.to_string())
    }

    /// As a failure to deliver to `channel`.
    pub fn into_delivery_error(self, channel: &str) -> Error {
        NotificationError::DeliveryFailed {
            channel: channel.to_string(),
            message: self.to_string(),
        }
        .into()
    }
}
