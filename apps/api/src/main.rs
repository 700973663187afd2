mod catalog;
mod config;
mod details;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::seed::seed_entries;
use crate::catalog::snapshot::SnapshotStore;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::enrichment::GeminiEnricher;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Archive API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; metadata and analysis will use fallbacks");
    }
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let snapshots = config.snapshot_path.clone().map(SnapshotStore::new);
    let catalog = load_catalog(&config, snapshots.as_ref())?;
    info!(
        "Catalog ready with {} entries (next id sequence {})",
        catalog.len(),
        catalog.next_seq()
    );
    if catalog.is_empty() {
        info!("Catalog starts empty; entries will be added through ingestion");
    }

    let state = AppState::new(catalog, Arc::new(GeminiEnricher::new(llm)), snapshots);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Snapshot first, then the demo seed, then an empty catalog.
fn load_catalog(config: &Config, snapshots: Option<&SnapshotStore>) -> Result<Catalog> {
    if let Some(store) = snapshots {
        let loaded = store
            .load()
            .with_context(|| format!("Failed to read snapshot {}", store.path().display()))?;
        if let Some(catalog) = loaded {
            return Ok(catalog);
        }
        info!("No snapshot at {} yet", store.path().display());
    }

    if config.seed_catalog {
        Ok(Catalog::from_parts(seed_entries(), 1))
    } else {
        Ok(Catalog::new())
    }
}
