//! Building-orientation tile API service.
//!
//! Serves transparent 256x256 PNG tiles with a polar histogram of building
//! orientation angles, read from a pre-populated SQLite aggregate store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tile_api::{router, state::AppState};

#[derive(Parser, Debug)]
#[command(name = "tile-api")]
#[command(about = "Building-orientation tile server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "TILE_API_LISTEN")]
    listen: String,

    /// Path to the SQLite aggregate database
    #[arg(short, long, env = "TILE_API_DATABASE")]
    database: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(database = %args.database, "Starting tile API server");

    let state = Arc::new(AppState::new(&args.database).await?);
    let app = router(state);

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
