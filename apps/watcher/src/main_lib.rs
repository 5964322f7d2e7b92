use std::sync::Arc;

use fundwatch_core::calendar::{NyseHolidayCalendar, TradingCalendar};
use fundwatch_core::{HoldingsWatcher, Result as CoreResult, RunOutcome, WatcherSettings};
use fundwatch_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, HoldingSnapshotRepository,
};
use fundwatch_transport::{HttpHoldingsFeed, SlackNotifier};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Exit status when feed, ingestion, storage or configuration failed.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when the report could not be delivered; data was stored.
pub const EXIT_UNDELIVERED: u8 = 2;

pub fn init_tracing() {
    let log_format = std::env::var("FUNDWATCH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_watcher(config: &Config) -> anyhow::Result<HoldingsWatcher> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());
    let repository = Arc::new(HoldingSnapshotRepository::new(pool, writer));

    let feed = Arc::new(HttpHoldingsFeed::new(&config.feed_url, config.http_timeout));
    let notifier = Arc::new(SlackNotifier::new(&config.slack_token, config.http_timeout));

    let holidays = NyseHolidayCalendar::new().with_extra_closures(config.extra_closures.iter().copied());
    let calendar = TradingCalendar::new(Arc::new(holidays));

    let settings = WatcherSettings::new(&config.fund_name, &config.slack_channel)
        .with_cash_tickers(config.cash_tickers.iter().cloned());

    Ok(HoldingsWatcher::new(
        feed, repository, calendar, notifier, settings,
    ))
}

/// Maps a run result to the process exit status.
pub fn exit_status(result: &CoreResult<RunOutcome>) -> u8 {
    match result {
        Ok(outcome) if outcome.delivered => 0,
        Ok(_) => EXIT_UNDELIVERED,
        Err(_) => EXIT_FAILURE,
    }
}
