//! PowerUp SA proxy server.
//!
//! # Usage
//!
//! ```bash
//! ESKOM_API_KEY=... cargo run --bin powerup-server
//! ```
//!
//! # Environment Variables
//!
//! See [`powerup_sa::config`]. `RUST_LOG` sets the log filter (default: info).

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use powerup_sa::config::ProxyConfig;
use powerup_sa::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ProxyConfig::load()?;
    info!(?config, "Configuration loaded");

    let state = AppState::from_config(&config);
    let app = create_router(state, &config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Backend server running on {}", address);
    info!(
        "API key configured: {}",
        if config.api_key_configured() { "YES" } else { "NO" }
    );
    info!(
        origins = ?config.allowed_origins,
        suffixes = ?config.allowed_origin_suffixes,
        "CORS enabled"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
