#![forbid(unsafe_code)]

//! `after8-deals` — deals service binary.
//!
//! Loads configuration, seeds the in-memory deal store and serves the
//! HTTP routes until ctrl-c or SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use after8_deals::config::GlobalConfig;
use after8_deals::http::{self, AppState};
use after8_deals::store::DealStore;
use after8_deals::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "after8-deals", about = "Late-night food deals server", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the configured HTTP port.
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("after8-deals bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = match &args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    if let Some(port) = args.port {
        config.http_port = port;
    }
    let config = Arc::new(config);
    info!(
        bind = %config.bind_address,
        port = config.http_port,
        latency_ms = config.store.latency_ms,
        "configuration loaded"
    );

    // ── Seed the store ──────────────────────────────────
    let store = DealStore::from_config(&config);
    store.seed(config.store.seed_count);

    let state = Arc::new(AppState {
        config: Arc::clone(&config),
        store,
    });

    // ── Serve until shutdown or server failure ──────────
    let ct = CancellationToken::new();
    let mut server_handle = tokio::spawn(http::serve(state, ct.clone()));

    let finished_early = tokio::select! {
        finished = &mut server_handle => Some(finished),
        signal = shutdown_signal() => {
            info!(signal, "shutdown signal received");
            None
        }
    };
    let served = match finished_early {
        Some(finished) => finished,
        None => {
            ct.cancel();
            server_handle.await
        }
    };

    match served {
        Ok(Ok(())) => info!("after8-deals shut down"),
        Ok(Err(err)) => {
            error!(%err, "http server failed");
            return Err(err);
        }
        Err(err) => {
            error!(%err, "http server task panicked");
            return Err(AppError::Http(format!("server task aborted: {err}")));
        }
    }

    Ok(())
}

/// Resolve once ctrl-c (or SIGTERM on unix) arrives, naming the signal.
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                _ = tokio::signal::ctrl_c() => "ctrl-c",
                _ = sigterm.recv() => "sigterm",
            },
            Err(err) => {
                tracing::warn!(%err, "SIGTERM handler unavailable; waiting for ctrl-c");
                wait_ctrl_c().await
            }
        }
    }

    #[cfg(not(unix))]
    {
        wait_ctrl_c().await
    }
}

async fn wait_ctrl_c() -> &'static str {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "ctrl-c handler failed; shutting down");
    }
    "ctrl-c"
}

/// Default filter when `RUST_LOG` is unset: this crate at `info`,
/// dependencies at `warn`.
const DEFAULT_LOG_FILTER: &str = "warn,after8_deals=info";

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = fmt().with_env_filter(env_filter).with_target(false);

    let installed = match log_format {
        LogFormat::Text => subscriber.try_init(),
        LogFormat::Json => subscriber.json().try_init(),
    };
    installed.map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))
}
