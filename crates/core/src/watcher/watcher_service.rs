use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error, info, warn};

use super::watcher_model::{RunOutcome, WatcherSettings};
use crate::calendar::{SessionWindow, TradingCalendar};
use crate::delta::{compute_deltas, DeltaReport};
use crate::errors::{Error, Result, SnapshotError};
use crate::holdings::{
    parse_holdings_csv, DaySnapshot, HoldingsFeedTrait, IngestSummary, SnapshotRepositoryTrait,
};
use crate::report::{
    render_delta_report, render_failure_notice, render_no_data_notice, NotifierTrait, Report,
    ReportMeta,
};

/// Runs the daily fetch, store, compare and notify cycle.
pub struct HoldingsWatcher {
    feed: Arc<dyn HoldingsFeedTrait>,
    repository: Arc<dyn SnapshotRepositoryTrait>,
    calendar: TradingCalendar,
    notifier: Arc<dyn NotifierTrait>,
    settings: WatcherSettings,
}

impl HoldingsWatcher {
    pub fn new(
        feed: Arc<dyn HoldingsFeedTrait>,
        repository: Arc<dyn SnapshotRepositoryTrait>,
        calendar: TradingCalendar,
        notifier: Arc<dyn NotifierTrait>,
        settings: WatcherSettings,
    ) -> Self {
        HoldingsWatcher {
            feed,
            repository,
            calendar,
            notifier,
            settings,
        }
    }

    pub fn settings(&self) -> &WatcherSettings {
        &self.settings
    }

    fn meta(&self) -> ReportMeta {
        ReportMeta {
            fund_name: self.settings.fund_name.clone(),
            source_url: self.feed.source_url().to_string(),
        }
    }

    /// Parses a holdings file and stores every valid row under its as-of date.
    pub async fn ingest(&self, bytes: &[u8]) -> Result<IngestSummary> {
        let parsed = parse_holdings_csv(bytes)?;
        let stored = self.repository.put_all(&parsed.positions).await?;
        info!(
            "Stored {} positions for {} ({} rows skipped)",
            stored,
            parsed.as_of,
            parsed.skipped.len()
        );
        Ok(IngestSummary {
            as_of: parsed.as_of,
            stored,
            skipped: parsed.skipped,
        })
    }

    /// Deltas between the stored snapshots of `window`.
    pub fn compare(&self, window: &SessionWindow) -> Result<DeltaReport> {
        let scanned = self
            .repository
            .scan_by_dates(&[window.previous, window.current])?;
        let current = DaySnapshot::from_scan(window.current, &scanned);
        let previous = DaySnapshot::from_scan(window.previous, &scanned);
        debug!(
            "Loaded {} positions for {} and {} for {}",
            current.positions.len(),
            current.date,
            previous.positions.len(),
            previous.date
        );
        compute_deltas(&current, &previous, &self.settings.cash_tickers)
    }

    /// Summary (or stale-feed notice) for the two sessions before `run_date`.
    pub fn build_report(&self, run_date: NaiveDate) -> Result<Report> {
        let window = self.calendar.session_window(run_date)?;
        info!(
            "Comparing holdings from {} to {}",
            window.previous, window.current
        );
        let deltas = self.compare(&window)?;
        Ok(render_delta_report(&deltas, &self.meta()))
    }

    /// Like [`build_report`](Self::build_report), but turns the errors a
    /// reader should hear about into a degraded notice.
    pub fn report_or_notice(&self, run_date: NaiveDate) -> Result<Report> {
        match self.build_report(run_date) {
            Ok(report) => Ok(report),
            Err(Error::Snapshot(SnapshotError::MissingSnapshot { current, previous })) => {
                let latest = match self.repository.latest_dates(1) {
                    Ok(dates) => dates.into_iter().next(),
                    Err(e) => {
                        warn!("Could not look up stored sessions: {}", e);
                        None
                    }
                };
                warn!(
                    "No holdings stored for {} or {} (latest stored: {:?})",
                    previous, current, latest
                );
                Ok(render_no_data_notice(
                    &SessionWindow { previous, current },
                    latest,
                    &self.meta(),
                ))
            }
            Err(e) if e.is_reportable() => {
                error!("Could not compute holdings changes: {}", e);
                Ok(render_failure_notice(run_date, &e.to_string(), &self.meta()))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch, ingest, compare and post.
    ///
    /// Feed, ingestion and storage failures abort the run. A failed post is
    /// logged and reported through [`RunOutcome::delivered`].
    pub async fn run(&self, run_date: NaiveDate) -> Result<RunOutcome> {
        info!(
            "Fetching {} holdings from {}",
            self.settings.fund_name,
            self.feed.source_url()
        );
        let bytes = self.feed.fetch_csv().await?;
        let ingest = self.ingest(&bytes).await?;

        let report = self.report_or_notice(run_date)?;
        let delivered = match self.notifier.post(&report, &self.settings.channel).await {
            Ok(()) => {
                info!(
                    "Posted {:?} report with {} rows to {}",
                    report.kind,
                    report.rows.len(),
                    self.settings.channel
                );
                true
            }
            Err(e) => {
                error!("Failed to deliver report: {}", e);
                false
            }
        };

        Ok(RunOutcome {
            ingest,
            report_kind: report.kind,
            delivered,
        })
    }
}
