//! Network transports for Fundwatch.
//!
//! Implements the collaborator traits defined in `fundwatch-core`:
//! - [`HttpHoldingsFeed`] downloads the published holdings CSV
//! - [`SlackNotifier`] posts rendered reports to a Slack channel

pub mod errors;
pub mod feed;
pub mod slack;

pub use errors::TransportError;
pub use feed::{HttpHoldingsFeed, DEFAULT_REQUEST_TIMEOUT};
pub use slack::SlackNotifier;
