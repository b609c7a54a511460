//! Meeting scheduler server entry point.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, info_span};
use tracing_subscriber::{fmt, EnvFilter};

use meeting_scheduler::cli::{Cli, LogFormat};
use scheduler_api::{serve, AppState};
use scheduler_persistence::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    match cli.log_format {
        LogFormat::Pretty => fmt().with_env_filter(filter).with_target(false).init(),
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
    }

    let log = info_span!("meeting_scheduler");
    let config = cli.api_config();
    let policy = cli.retry_policy();
    let path = cli.database.clone();

    info!(parent: &log, database = %path.display(), "opening database");
    let store = tokio::task::spawn_blocking(move || SqliteStore::open_with_retry(&path, policy))
        .await??;

    let state = AppState::new(config, Arc::new(store), log.clone());
    serve(state).await?;

    info!(parent: &log, "server exited");
    Ok(())
}
