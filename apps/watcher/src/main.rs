mod config;
mod main_lib;

use std::process::ExitCode;

use config::Config;
use fundwatch_core::utils::time_utils::exchange_date_today;
use main_lib::{build_watcher, exit_status, init_tracing, EXIT_FAILURE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let watcher = match build_watcher(&config).await {
        Ok(watcher) => watcher,
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let run_date = config.run_date.unwrap_or_else(exchange_date_today);
    tracing::info!("Running {} watcher for {}", config.fund_name, run_date);

    let result = watcher.run(run_date).await;
    match &result {
        Ok(outcome) => tracing::info!(
            "Run finished: {} stored, {} skipped, {:?} report, delivered={}",
            outcome.ingest.stored,
            outcome.ingest.skipped.len(),
            outcome.report_kind,
            outcome.delivered
        ),
        Err(e) => tracing::error!("Run failed: {}", e),
    }
    ExitCode::from(exit_status(&result))
}
