//! Report domain models.

use serde::{Deserialize, Serialize};

/// What a posted report communicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    /// Normal per-ticker changes
    Summary,
    /// The new session's holdings were not published yet
    StaleFeed,
    /// Neither session has stored holdings
    NoData,
    /// The comparison could not be computed
    Failure,
}

/// One line of the two-column summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub ticker: String,
    pub change: String,
}

/// Fund details shown around every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub fund_name: String,
    pub source_url: String,
}

/// Transport-neutral rendering of a run's result.
///
/// Notifiers decide how to lay this out; the text in it is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: ReportKind,
    /// Markdown header, e.g. `*MSOS Holdings*\n*Changes from ... to ...*`
    pub header: String,
    /// Ordered as the delta engine ordered them. Empty for notices.
    pub rows: Vec<ReportRow>,
    pub cash_line: Option<String>,
    /// Explanation shown on degraded notices.
    pub body: Option<String>,
    /// Footer line linking the source file.
    pub context: String,
}

impl Report {
    pub fn is_degraded(&self) -> bool {
        self.kind != ReportKind::Summary
    }

    /// Plain-text fallback for clients that cannot render rich layouts.
    pub fn to_plain_text(&self) -> String {
        let mut lines: Vec<String> = vec![self.header.replace('*', "")];
        if let Some(body) = &self.body {
            lines.push(body.clone());
        }
        lines.extend(
            self.rows
                .iter()
                .map(|row| format!("{}: {}", row.ticker, row.change)),
        );
        if let Some(cash) = &self.cash_line {
            lines.push(cash.clone());
        }
        lines.join("\n")
    }
}
