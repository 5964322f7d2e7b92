use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::calendar::{HolidayCalendarTrait, NyseHolidayCalendar, TradingCalendar};
use crate::errors::{CalendarError, Error, NotificationError, Result};
use crate::holdings::{HoldingsFeedTrait, PositionSnapshot, SnapshotRepositoryTrait};
use crate::report::{NotifierTrait, Report, ReportKind};

const HEADER: &str = "Date ,Account ,Stock Ticker ,Security Description ,Shares/Par (Full) ,Price (Base) ,Traded Market Value (Base) ,Portfolio Weight %";

#[derive(Default)]
struct InMemoryRepository {
    rows: Mutex<Vec<PositionSnapshot>>,
}

impl InMemoryRepository {
    fn seeded(rows: Vec<PositionSnapshot>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for InMemoryRepository {
    async fn put(&self, snapshot: &PositionSnapshot) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| !(r.ticker == snapshot.ticker && r.date == snapshot.date));
        rows.push(snapshot.clone());
        Ok(())
    }

    async fn put_all(&self, snapshots: &[PositionSnapshot]) -> Result<usize> {
        for snapshot in snapshots {
            self.put(snapshot).await?;
        }
        Ok(snapshots.len())
    }

    fn scan_by_dates(&self, dates: &[NaiveDate]) -> Result<Vec<PositionSnapshot>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| dates.contains(&r.date))
            .cloned()
            .collect())
    }

    fn latest_dates(&self, limit: usize) -> Result<Vec<NaiveDate>> {
        let dates: BTreeSet<NaiveDate> = self.rows.lock().unwrap().iter().map(|r| r.date).collect();
        Ok(dates.into_iter().rev().take(limit).collect())
    }
}

struct StaticFeed {
    content: Option<String>,
}

#[async_trait]
impl HoldingsFeedTrait for StaticFeed {
    fn source_url(&self) -> &str {
        "https://example.com/msos.csv"
    }

    async fn fetch_csv(&self) -> Result<Vec<u8>> {
        self.content
            .as_ref()
            .map(|c| c.clone().into_bytes())
            .ok_or_else(|| Error::Feed("HTTP 503".to_string()))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    fail: bool,
    posted: Mutex<Vec<(String, Report)>>,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn posted(&self) -> Vec<(String, Report)> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierTrait for RecordingNotifier {
    async fn post(&self, report: &Report, channel: &str) -> Result<()> {
        if self.fail {
            return Err(NotificationError::DeliveryFailed {
                channel: channel.to_string(),
                message: "channel_not_found".to_string(),
            }
            .into());
        }
        self.posted
            .lock()
            .unwrap()
            .push((channel.to_string(), report.clone()));
        Ok(())
    }
}

struct BrokenHolidays;

impl HolidayCalendarTrait for BrokenHolidays {
    fn exchange(&self) -> &str {
        "TEST"
    }

    fn is_holiday(&self, _date: NaiveDate) -> Result<bool> {
        Err(CalendarError::Unavailable("no calendar".to_string()).into())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn snapshot(on: NaiveDate, ticker: &str, shares: Decimal, weight: Decimal) -> PositionSnapshot {
    PositionSnapshot {
        date: on,
        ticker: ticker.to_string(),
        shares,
        price: dec!(1),
        value: shares,
        weight,
    }
}

fn friday_holdings() -> Vec<PositionSnapshot> {
    let friday = date(2024, 3, 8);
    vec![
        snapshot(friday, "GTBIF", dec!(80), dec!(0.10)),
        snapshot(friday, "TCNNF", dec!(300), dec!(0.02)),
        snapshot(friday, "CASH", dec!(900), dec!(0.01)),
    ]
}

fn monday_feed() -> String {
    [
        HEADER,
        r#"03/11/2024,MSOS,GTBIF,GREEN THUMB,100,12.50,"1,250",10.5%"#,
        r#"03/11/2024,MSOS,CURLF,CURALEAF,50,4.00,200,1%"#,
        r#"03/11/2024,MSOS,,CASH,"1,000.00",1.00,"1,000.00",0.50%"#,
        r#"03/11/2024,MSOS,nan,BLACKROCK TREASURY TRUST INSTL 62,500,1.00,500,0.25%"#,
    ]
    .join("\n")
}

struct Fixture {
    repository: Arc<InMemoryRepository>,
    notifier: Arc<RecordingNotifier>,
    watcher: HoldingsWatcher,
}

fn fixture_with(
    feed: Option<String>,
    seeded: Vec<PositionSnapshot>,
    notifier: RecordingNotifier,
    holidays: Arc<dyn HolidayCalendarTrait>,
) -> Fixture {
    let repository = Arc::new(InMemoryRepository::seeded(seeded));
    let notifier = Arc::new(notifier);
    let watcher = HoldingsWatcher::new(
        Arc::new(StaticFeed { content: feed }),
        repository.clone(),
        TradingCalendar::new(holidays),
        notifier.clone(),
        WatcherSettings::new("MSOS", "C0123"),
    );
    Fixture {
        repository,
        notifier,
        watcher,
    }
}

fn fixture(feed: Option<String>, seeded: Vec<PositionSnapshot>) -> Fixture {
    fixture_with(
        feed,
        seeded,
        RecordingNotifier::default(),
        Arc::new(NyseHolidayCalendar::new()),
    )
}

#[tokio::test]
async fn test_run_ingests_compares_and_posts_summary() {
    let f = fixture(Some(monday_feed()), friday_holdings());

    // Tuesday run compares Friday with Monday
    let outcome = f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert_eq!(outcome.ingest.as_of, date(2024, 3, 11));
    assert_eq!(outcome.ingest.stored, 4);
    assert!(outcome.ingest.skipped.is_empty());
    assert_eq!(outcome.report_kind, ReportKind::Summary);
    assert!(outcome.delivered);

    let posted = f.notifier.posted();
    assert_eq!(posted.len(), 1);
    let (channel, report) = &posted[0];
    assert_eq!(channel, "C0123");
    assert_eq!(
        report.header,
        "*MSOS Holdings*\n*Changes from 03/08/2024 to 03/11/2024*"
    );
    let rows: Vec<(&str, &str)> = report
        .rows
        .iter()
        .map(|r| (r.ticker.as_str(), r.change.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("CURLF", "+50 (new position)"),
            ("GTBIF", "+20 (+25.0%)"),
            ("TCNNF", "-300 (exited)"),
        ]
    );
    assert_eq!(report.cash_line.as_deref(), Some("Cash: $1,500.00"));
    assert!(report.context.contains("https://example.com/msos.csv"));
}

#[tokio::test]
async fn test_rerun_same_day_is_idempotent() {
    let f = fixture(Some(monday_feed()), friday_holdings());

    f.watcher.run(date(2024, 3, 12)).await.unwrap();
    let stored_after_first = f.repository.count();
    f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert_eq!(f.repository.count(), stored_after_first);
    let posted = f.notifier.posted();
    assert_eq!(posted.len(), 2);
    assert_eq!(posted[0].1, posted[1].1);
}

#[tokio::test]
async fn test_feed_failure_aborts_before_posting() {
    let f = fixture(None, friday_holdings());

    let err = f.watcher.run(date(2024, 3, 12)).await.unwrap_err();

    assert!(matches!(err, Error::Feed(_)));
    assert!(f.notifier.posted().is_empty());
}

#[tokio::test]
async fn test_unparsable_feed_aborts_run() {
    let content = format!("{}\n03/11/2024,MSOS,GTBIF,GREEN THUMB,lots,1,1,1%", HEADER);
    let f = fixture(Some(content), friday_holdings());

    let err = f.watcher.run(date(2024, 3, 12)).await.unwrap_err();

    assert!(matches!(err, Error::Ingestion(_)));
    assert_eq!(f.repository.count(), 3);
    assert!(f.notifier.posted().is_empty());
}

#[tokio::test]
async fn test_missing_previous_session_posts_stale_notice() {
    let f = fixture(Some(monday_feed()), Vec::new());

    let outcome = f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert_eq!(outcome.report_kind, ReportKind::StaleFeed);
    let report = &f.notifier.posted()[0].1;
    assert!(report.rows.is_empty());
}

#[tokio::test]
async fn test_unpublished_session_posts_stale_notice() {
    // Feed still serves Friday's file on Tuesday
    let friday_feed = monday_feed().replace("03/11/2024", "03/08/2024");
    let f = fixture(Some(friday_feed), Vec::new());

    let outcome = f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert_eq!(outcome.ingest.as_of, date(2024, 3, 8));
    assert_eq!(outcome.report_kind, ReportKind::StaleFeed);
}

#[tokio::test]
async fn test_no_stored_sessions_posts_no_data_notice() {
    // A file dated long ago leaves both sessions of the window empty
    let old_feed = monday_feed().replace("03/11/2024", "01/02/2024");
    let f = fixture(Some(old_feed), Vec::new());

    let outcome = f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert_eq!(outcome.report_kind, ReportKind::NoData);
    let report = &f.notifier.posted()[0].1;
    let body = report.body.as_deref().unwrap();
    assert!(body.contains("03/08/2024"));
    assert!(body.contains("most recent stored holdings are from 01/02/2024"));
}

#[tokio::test]
async fn test_calendar_failure_posts_failure_notice() {
    let f = fixture_with(
        Some(monday_feed()),
        friday_holdings(),
        RecordingNotifier::default(),
        Arc::new(BrokenHolidays),
    );

    let outcome = f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert_eq!(outcome.report_kind, ReportKind::Failure);
    assert!(outcome.delivered);
    let report = &f.notifier.posted()[0].1;
    assert!(report.body.as_deref().unwrap().contains("no calendar"));
}

#[tokio::test]
async fn test_delivery_failure_keeps_ingested_data() {
    let f = fixture_with(
        Some(monday_feed()),
        friday_holdings(),
        RecordingNotifier::failing(),
        Arc::new(NyseHolidayCalendar::new()),
    );

    let outcome = f.watcher.run(date(2024, 3, 12)).await.unwrap();

    assert!(!outcome.delivered);
    assert_eq!(outcome.report_kind, ReportKind::Summary);
    assert_eq!(f.repository.count(), 7);
}

#[tokio::test]
async fn test_build_report_over_holiday_weekend() {
    // Presidents' Day 2024-02-19: a Wednesday run compares Friday with Tuesday
    let friday = date(2024, 2, 16);
    let tuesday = date(2024, 2, 20);
    let f = fixture(
        None,
        vec![
            snapshot(friday, "GTBIF", dec!(100), dec!(0.1)),
            snapshot(tuesday, "GTBIF", dec!(90), dec!(0.1)),
        ],
    );

    let report = f.watcher.build_report(date(2024, 2, 21)).unwrap();

    assert_eq!(
        report.header,
        "*MSOS Holdings*\n*Changes from 02/16/2024 to 02/20/2024*"
    );
    assert_eq!(report.rows[0].change, "-10 (-10.0%)");
}
