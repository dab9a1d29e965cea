//! MagicUI HTTP Server
//!
//! Serves AI-generated UI fragments over a REST API.

pub mod api;
pub mod config;
pub mod error;

use crate::config::ServerConfig;
use anyhow::Result;
use magicui_llm::{FileCacheStore, GeneratorConfig, UiGenerator};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    // Load configuration
    let config = ServerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    // Initialize the UI generator
    let generator = init_generator(&config);
    info!("UI generator initialized");

    // Create router
    let app = api::create_router(Arc::new(generator));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Generation API: http://{}/api/generate-magic-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "magicui_server=info,magicui_llm=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Build the production generator from configuration
fn init_generator(config: &ServerConfig) -> UiGenerator {
    let cache = Arc::new(FileCacheStore::new(&config.cache_path));
    let mut generator_config = GeneratorConfig::default()
        .with_generation_timeout(Duration::from_millis(config.generation_timeout_millis));
    if let Some(provider) = config.default_provider {
        generator_config = generator_config.with_baseline_provider(provider);
    }

    UiGenerator::new(cache).with_config(generator_config)
}
