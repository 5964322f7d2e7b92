use async_trait::async_trait;

use super::Report;
use crate::errors::Result;

/// Delivers rendered reports to a chat channel.
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    /// Post `report` to the channel with id `channel`.
    ///
    /// Failures are `Error::Notification`; the caller decides whether they
    /// abort the run.
    async fn post(&self, report: &Report, channel: &str) -> Result<()>;
}
