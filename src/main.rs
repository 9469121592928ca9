// ABOUTME: Entry point for the jotter binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and starts the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use jotter_server::{AppState, ServerConfig, create_router};

/// Notes and tasks over HTTP, backed by JSON files on disk.
#[derive(Debug, Parser)]
#[command(name = "jotter", version)]
struct Cli {
    /// Socket address to bind (overrides JOTTER_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory holding the data files (overrides JOTTER_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// API key expected in the X-API-Key header (overrides JOTTER_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jotter=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env_with_overrides(cli.data_dir, cli.bind, cli.api_key)?;

    let state = Arc::new(AppState::new(&config.data_dir)?);
    let app = create_router(state, Some(config.api_key.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("jotter listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
