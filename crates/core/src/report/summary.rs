//! Renders delta results and degraded outcomes into [`Report`]s.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::formatters::{format_change, format_money};
use super::report_model::{Report, ReportKind, ReportMeta, ReportRow};
use crate::calendar::SessionWindow;
use crate::constants::REPORT_DATE_FORMAT;
use crate::delta::{DeltaRecord, DeltaReport};

/// Normal summary: one row per record, in the order given.
pub fn render_summary(
    records: &[DeltaRecord],
    cash_total: Option<Decimal>,
    window: &SessionWindow,
    meta: &ReportMeta,
) -> Report {
    let rows = records
        .iter()
        .map(|record| ReportRow {
            ticker: record.ticker.clone(),
            change: format_change(record),
        })
        .collect();

    Report {
        kind: ReportKind::Summary,
        header: window_header(window, meta),
        rows,
        cash_line: cash_total.map(|total| format!("Cash: {}", format_money(Some(total)))),
        body: None,
        context: context_line(meta),
    }
}

/// Picks the summary or the stale-feed notice for a computed delta report.
pub fn render_delta_report(report: &DeltaReport, meta: &ReportMeta) -> Report {
    let window = SessionWindow {
        previous: report.previous_date,
        current: report.current_date,
    };
    if report.stale_feed {
        render_stale_feed_notice(&window, meta)
    } else {
        render_summary(&report.records, report.cash_total, &window, meta)
    }
}

pub fn render_stale_feed_notice(window: &SessionWindow, meta: &ReportMeta) -> Report {
    notice(
        ReportKind::StaleFeed,
        window_header(window, meta),
        format!(
            "Holdings for {} do not appear to be published yet. No changes are reported.",
            format_date(window.current)
        ),
        meta,
    )
}

/// Neither session of the window has stored holdings.
/// `latest_stored` is the newest date with any stored holdings, if known.
pub fn render_no_data_notice(
    window: &SessionWindow,
    latest_stored: Option<NaiveDate>,
    meta: &ReportMeta,
) -> Report {
    let mut body = format!(
        "No holdings are stored for {} or {}.",
        format_date(window.previous),
        format_date(window.current)
    );
    if let Some(latest) = latest_stored {
        body.push_str(&format!(
            " The most recent stored holdings are from {}.",
            format_date(latest)
        ));
    }
    notice(ReportKind::NoData, window_header(window, meta), body, meta)
}

/// Used when the session window itself could not be resolved.
pub fn render_failure_notice(run_date: NaiveDate, reason: &str, meta: &ReportMeta) -> Report {
    notice(
        ReportKind::Failure,
        format!("*{} Holdings*\n*Run of {}*", meta.fund_name, format_date(run_date)),
        format!("Could not compute holdings changes: {}", reason),
        meta,
    )
}

fn notice(kind: ReportKind, header: String, body: String, meta: &ReportMeta) -> Report {
    Report {
        kind,
        header,
        rows: Vec::new(),
        cash_line: None,
        body: Some(body),
        context: context_line(meta),
    }
}

fn window_header(window: &SessionWindow, meta: &ReportMeta) -> String {
    format!(
        "*{} Holdings*\n*Changes from {} to {}*",
        meta.fund_name,
        format_date(window.previous),
        format_date(window.current)
    )
}

fn context_line(meta: &ReportMeta) -> String {
    format!("Source: <{}|{} holdings file>", meta.source_url, meta.fund_name)
}

fn format_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}
