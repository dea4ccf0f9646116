//! session-stub - a mock login/keepalive/logout JSON-RPC server.
//!
//! Clients under test point at this instead of the real user service. It
//! always answers with the same credentials and session id.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use session_stub_core::{http, Config, SessionService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix of the daily rolling log file
const LOG_FILE_PREFIX: &str = "session-stub.log";

#[derive(Parser, Debug)]
#[command(version, about = "Mock login/keepalive/logout JSON-RPC server")]
struct Args {
    /// JSON config file
    #[arg(short, long, env = "SESSION_STUB_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, env = "SESSION_STUB_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SESSION_STUB_PORT")]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "SESSION_STUB_LOG")]
    log_level: Option<String>,

    /// Directory for daily rolling log files
    #[arg(long, env = "SESSION_STUB_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    /// Command-line values win over the config file.
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(dir) = self.log_dir {
            config.log_dir = Some(dir);
        }
        config
    }
}

/// Initialize the tracing subscriber for logging.
///
/// The returned guard flushes the file writer and must outlive the server.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let config = args.apply(config);
    config.validate().context("Invalid configuration")?;

    let _guard = init_tracing(&config);
    info!(?config, "session-stub starting");

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    http::serve(listener, SessionService::default(), shutdown_signal()).await?;

    info!("session-stub shutting down");
    Ok(())
}
