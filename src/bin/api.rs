//! IPL Insights API Server
//!
//! Run with: cargo run --bin ipl-insights-api
//!
//! # Configuration
//!
//! Read from `<config_dir>/ipl-insights/config.toml` or `./config.toml`, then
//! overridden by environment variables:
//! - `IPL_MATCHES_PATH`: Match table (default: matches_cleaned.csv)
//! - `IPL_DELIVERIES_PATH`: Delivery table (default: deliveries_cleaned.csv)
//! - `IPL_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `IPL_API_PORT`: Port to listen on (default: 8090)
//! - `IPL_LOG_LEVEL`, `IPL_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over `IPL_LOG_LEVEL`

use anyhow::Context;
use ipl_insights::api::{serve, AppState};
use ipl_insights::config::Config;
use ipl_insights::data::{DatasetCache, DatasetLoader};
use ipl_insights::logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    logging::init(&config.logging);

    tracing::info!("Starting IPL Insights API server v{}", env!("CARGO_PKG_VERSION"));

    let source = config.data.source();
    tracing::info!(
        "Match table: {:?}, delivery table: {:?}",
        source.matches_path,
        source.deliveries_path
    );

    let franchises = Arc::new(config.franchise_table());
    tracing::info!("Franchise table: {} entries", franchises.len());

    let cache = Arc::new(DatasetCache::new(source, DatasetLoader::new(franchises)));

    // Load up front so the first request does not pay for it
    match cache.snapshot().await {
        Ok(dataset) => tracing::info!("Dataset loaded: {}", dataset.report),
        Err(e) => tracing::warn!("Dataset not loaded yet: {} (requests will retry)", e),
    }

    let state = AppState::new(cache, config.api.clone());

    serve(state, &config.api)
        .await
        .with_context(|| format!("API server on {} failed", config.api.addr()))?;

    tracing::info!("IPL Insights API server stopped");
    Ok(())
}
