use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::blocks::{report_blocks, Block};
use crate::errors::TransportError;
use fundwatch_core::errors::Result;
use fundwatch_core::report::{NotifierTrait, Report};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Serialize)]
pub struct PostMessage<'a> {
    pub channel: &'a str,
    /// Notification and accessibility fallback.
    pub text: String,
    pub blocks: Vec<Block>,
    pub unfurl_links: bool,
}

impl<'a> PostMessage<'a> {
    pub fn for_report(report: &Report, channel: &'a str) -> Self {
        Self {
            channel,
            text: report.to_plain_text(),
            blocks: report_blocks(report),
            unfurl_links: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    warning: Option<String>,
}

/// Posts reports with `chat.postMessage`.
pub struct SlackNotifier {
    client: Client,
    token: String,
    api_base: String,
}

impl SlackNotifier {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the notifier at another Slack-compatible API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    async fn post_message(&self, message: &PostMessage<'_>) -> std::result::Result<(), TransportError> {
        let url = format!("{}/chat.postMessage", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: SlackResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        if let Some(warning) = &body.warning {
            warn!("Slack warning: {}", warning);
        }
        if !body.ok {
            return Err(TransportError::Slack(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NotifierTrait for SlackNotifier {
    async fn post(&self, report: &Report, channel: &str) -> Result<()> {
        let message = PostMessage::for_report(report, channel);
        debug!(
            "Posting {:?} report as {} blocks to {}",
            report.kind,
            message.blocks.len(),
            channel
        );
        self.post_message(&message)
            .await
            .map_err(|e| e.into_delivery_error(channel))
    }
}
