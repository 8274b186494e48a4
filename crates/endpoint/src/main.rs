//! `endpoint-server` — binary entry point.
//!
//! Startup sequence:
//! 1. Parse flags and load [`Config`] (flags > environment > defaults).
//! 2. Initialise the tracing subscriber (and OTLP export when configured).
//! 3. Load the TLS certificate and key.
//! 4. Build the Axum router over the map directory.
//! 5. Bind the listener and serve HTTPS until Ctrl-C / SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use endpoint::config::{self, Cli, Config};
use endpoint::server::{listener, router, state::AppState, tls};
use endpoint::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::load(Cli::parse()).map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level, cfg.otlp_endpoint.as_deref())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        mapdir = %cfg.mapdir.display(),
        "map-endpoint starting"
    );
    if !cfg.mapdir.is_dir() {
        warn!(mapdir = %cfg.mapdir.display(), "mapdir is not a directory; map requests will fail");
    }

    // -----------------------------------------------------------------------
    // 3. TLS material
    // -----------------------------------------------------------------------
    let paths = cfg.tls_paths(config::system_hostname)?;
    let tls = tls::load_server_config(&paths.cert, &paths.key)?;

    // -----------------------------------------------------------------------
    // 4. Router
    // -----------------------------------------------------------------------
    let router = router::build(AppState::from_dir(cfg.mapdir.clone()));

    // -----------------------------------------------------------------------
    // 5. HTTPS server
    // -----------------------------------------------------------------------
    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let tcp = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    listener::serve(tcp, tls, router, shutdown_signal()).await?;

    telemetry::shutdown();
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
