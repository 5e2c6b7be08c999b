//! Miniblog API server
//!
//! Main entry point that wires the crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use miniblog_api::{AppState, build_router};
use miniblog_auth::TokenCodec;
use miniblog_core::config::{AppConfig, AuthMode, ServerMode};
use miniblog_core::error::AppError;
use miniblog_core::types::IdGenerator;
use miniblog_store::MemoryUserStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("MINIBLOG_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Miniblog v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage ──────────────────────────────────────────
    let store = Arc::new(MemoryUserStore::new(IdGenerator::from_config(&config.id)));

    // ── Step 2: Auth ─────────────────────────────────────────────
    let codec = Arc::new(TokenCodec::new(&config.auth));
    if config.auth.mode == AuthMode::Bypass {
        tracing::warn!(
            "Authentication bypass enabled: identities are taken from the X-User-ID header"
        );
    }

    // ── Step 3: HTTP router ──────────────────────────────────────
    let mode = config.server.mode;
    let addr = config.server.bind_addr();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, store.clone(), store, codec);
    let app = build_router(state);

    if mode != ServerMode::Http {
        tracing::info!(
            mode = %mode,
            "No generated RPC services are bundled; serving the HTTP router"
        );
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(mode = %mode, "Miniblog server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
    });
    let mut server_task = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut server_task => return flatten(joined),
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(grace, &mut server_task).await {
        Ok(joined) => flatten(joined)?,
        Err(_) => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, aborting remaining requests"
            );
            server_task.abort();
        }
    }

    tracing::info!("Miniblog server shut down");
    Ok(())
}

fn flatten(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
