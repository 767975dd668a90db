//! Elevation tile rendering server.
//!
//! HTTP server colorizing the world's elevation surface into themed
//! and raw-encoded raster tiles.

mod handlers;
mod rendering;
mod state;
mod validation;

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use state::{AppState, SourceKind};

#[derive(Parser, Debug)]
#[command(name = "tile-api")]
#[command(about = "Elevation tile rendering server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Directory holding the polygon layer files
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Upstream elevation source
    #[arg(long, value_enum, default_value_t = SourceKind::Terrarium)]
    elevation_source: SourceKind,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting elevation tile server");

    // Load coverage layers and set up shared state
    let state = Arc::new(AppState::new(&args.data_dir, args.elevation_source).await?);
    info!(source = state.elevation.source_name(), "Elevation source ready");

    // Build router
    let app = Router::new()
        .route("/:provider/:z/:y/:x", get(handlers::tile_handler))
        .route("/health", get(handlers::health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: std::net::SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");
    info!("Tile URL format: /{{provider}}/{{z}}/{{y}}/{{x}}.png");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
