#![allow(clippy::doc_markdown)]
//! `StyleAura` Server - REST API for the StyleAura product catalog.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use styleaura_core::{connect, CatalogService, StyleAuraConfig, DEFAULT_CONFIG_FILE};
use styleaura_server::{build_router, AppState};

/// StyleAura Server - product catalog backend
#[derive(Parser, Debug)]
#[command(name = "styleaura-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (missing file means defaults plus environment)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "STYLEAURA_CONFIG")]
    config: PathBuf,

    /// Host address to bind to (overrides the configuration)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the configuration)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = StyleAuraConfig::load_from_path(&args.config)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StyleAura server...");
    tracing::info!("Configuration file: {}", args.config.display());

    // Initialize catalog
    let store = connect(&config.store).await?;
    let catalog = CatalogService::new(store)
        .with_collection(config.catalog.collection.clone())
        .with_settings(&config.store);
    tracing::info!(
        collection = catalog.collection(),
        configured = catalog.is_configured(),
        "Catalog ready"
    );
    let state = Arc::new(AppState::new(catalog).with_limits(&config.catalog)?);

    let app = build_router(state, config.server.cors_enabled);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("StyleAura server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
