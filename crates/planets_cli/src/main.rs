//! Planets HTTP server entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Initialize logging, open the database and serve until Ctrl-C.

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use planets_api::AppState;
use planets_core::db::{open_db, open_db_in_memory};
use planets_core::{core_version, default_log_level, init_logging};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "planets", version, about = "REST service for planet records")]
struct Args {
    /// Address the HTTP server listens on.
    #[arg(long, env = "PLANETS_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// SQLite database file. Uses an in-memory database when omitted.
    #[arg(long, env = "PLANETS_DB_PATH")]
    db_path: Option<PathBuf>,

    /// trace|debug|info|warn|error. Defaults to debug in debug builds, info otherwise.
    #[arg(long, env = "PLANETS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files. Defaults to `./logs`.
    #[arg(long, env = "PLANETS_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn resolved_log_dir(&self) -> anyhow::Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"));
        if dir.is_absolute() {
            return Ok(dir);
        }
        let cwd = std::env::current_dir().context("failed to resolve working directory")?;
        Ok(cwd.join(dir))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = args.resolved_log_dir()?;
    start_logging(&level, &log_dir)?;

    let conn = match &args.db_path {
        Some(path) => open_db(path)
            .with_context(|| format!("failed to open database `{}`", path.display()))?,
        None => {
            warn!("event=db_config module=cli status=ok mode=memory persistent=false");
            open_db_in_memory().context("failed to open in-memory database")?
        }
    };

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(
        "event=cli_start module=cli status=ok version={} bind={}",
        core_version(),
        args.bind
    );

    planets_api::serve(listener, AppState::new(conn), shutdown_signal()).await?;
    Ok(())
}

fn start_logging(level: &str, log_dir: &Path) -> anyhow::Result<()> {
    init_logging(level, log_dir).context("failed to initialize logging")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=cli status=error error={err}");
        // without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_signal module=cli status=ok");
}

#[cfg(test)]
mod tests {
    use super::start_logging;

    #[test]
    fn logging_failure_keeps_the_io_cause() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let log_dir = blocker.path().join("logs");

        let err = start_logging("info", &log_dir).unwrap_err();

        assert_eq!(err.to_string(), "failed to initialize logging");
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<std::io::Error>().is_some()));
        assert!(format!("{err:#}").contains("failed to create log directory"));
    }
}
