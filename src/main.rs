use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use foodshare_api::config::{AppConfig, StoreBackend};
use foodshare_api::database::DatabaseManager;
use foodshare_api::{app, AppState};

#[derive(Parser)]
#[command(name = "foodshare-api")]
#[command(about = "Food sharing API server")]
#[command(version)]
struct ServerArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Listing store backend: mongo or memory (overrides FOOD_STORE)")]
    store: Option<StoreBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_USER, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("foodshare_api=info,tower_http=info")),
        )
        .init();

    let args = ServerArgs::parse();
    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(store) = args.store {
        config.store.backend = store;
    }

    info!("Starting food sharing API in {:?} mode", config.environment);
    if config.security.access_token_secret.is_empty() {
        warn!("ACCESS_TOKEN_SECRET is not set; token issuance and protected routes will fail");
    }

    let store = DatabaseManager::connect(&config)
        .await
        .context("failed to open listing store")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config, store.clone());

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {}", e);
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
