use std::time::Duration;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use fundwatch_core::constants::DEFAULT_CASH_TICKERS;

pub const DEFAULT_FEED_URL: &str =
    "https://advisorshares.com/wp-content/uploads/csv/holdings/AdvisorShares_MSOS_Holdings_File.csv";

pub struct Config {
    pub slack_token: String,
    pub slack_channel: String,
    pub feed_url: String,
    pub db_path: String,
    pub fund_name: String,
    pub cash_tickers: Vec<String>,
    pub extra_closures: Vec<NaiveDate>,
    /// Overrides "today" in the exchange timezone, for backfills.
    pub run_date: Option<NaiveDate>,
    pub http_timeout: Duration,
}

impl Config {
    /// Reads the process environment. `.env` is loaded by `main` before
    /// tracing starts, so it is not read again here.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| var(key).ok_or_else(|| anyhow!("{} must be set", key));

        let slack_token = required("FUNDWATCH_SLACK_TOKEN")?;
        let slack_channel = required("FUNDWATCH_SLACK_CHANNEL")?;
        let feed_url = var("FUNDWATCH_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.into());
        let db_path = var("FUNDWATCH_DB_PATH").unwrap_or_else(|| "./db/fundwatch.db".into());
        let fund_name = var("FUNDWATCH_FUND_NAME").unwrap_or_else(|| "MSOS".into());

        let cash_tickers = match var("FUNDWATCH_CASH_TICKERS") {
            Some(list) => split_list(&list).map(str::to_string).collect(),
            None => DEFAULT_CASH_TICKERS.iter().map(|t| t.to_string()).collect(),
        };

        let extra_closures = var("FUNDWATCH_EXTRA_CLOSURES")
            .map(|list| {
                split_list(&list)
                    .map(|day| parse_date("FUNDWATCH_EXTRA_CLOSURES", day))
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        let run_date = var("FUNDWATCH_RUN_DATE")
            .map(|day| parse_date("FUNDWATCH_RUN_DATE", &day))
            .transpose()?;

        let timeout_secs: u64 = match var("FUNDWATCH_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FUNDWATCH_HTTP_TIMEOUT_SECS '{}'", raw))?,
            None => 30,
        };

        Ok(Self {
            slack_token,
            slack_channel,
            feed_url,
            db_path,
            fund_name,
            cash_tickers,
            extra_closures,
            run_date,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(key: &str, raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in {} (expected YYYY-MM-DD)", raw, key))
}
