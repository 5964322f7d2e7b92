//! Slack delivery of reports.

pub mod blocks;
mod notifier;

pub use blocks::{report_blocks, Block, TextObject};
pub use notifier::{PostMessage, SlackNotifier, DEFAULT_API_BASE};
