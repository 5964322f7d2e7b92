use std::collections::HashSet;

use serde::Serialize;

use crate::constants::DEFAULT_CASH_TICKERS;
use crate::holdings::IngestSummary;
use crate::report::ReportKind;

/// Per-deployment settings handed to the watcher by the binary.
#[derive(Debug, Clone)]
pub struct WatcherSettings {
    /// Fund label used in report headers, e.g. `MSOS`.
    pub fund_name: String,
    /// Channel id reports are posted to.
    pub channel: String,
    /// Identifiers aggregated into the cash line instead of listed.
    pub cash_tickers: HashSet<String>,
}

impl WatcherSettings {
    pub fn new(fund_name: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            fund_name: fund_name.into(),
            channel: channel.into(),
            cash_tickers: DEFAULT_CASH_TICKERS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_cash_tickers(mut self, tickers: impl IntoIterator<Item = String>) -> Self {
        self.cash_tickers = tickers.into_iter().collect();
        self
    }
}

/// What a full run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub ingest: IngestSummary,
    pub report_kind: ReportKind,
    /// False when the notifier failed; the ingested data is kept regardless.
    pub delivered: bool,
}
