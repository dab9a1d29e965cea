//! Server configuration

use magicui_core::Provider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Path of the file-backed generation cache
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Baseline provider used when neither request nor model decide one
    #[serde(default)]
    pub default_provider: Option<Provider>,

    /// Generation timeout in milliseconds
    #[serde(default = "default_generation_timeout_millis")]
    pub generation_timeout_millis: u64,

    /// Log level
    pub log_level: String,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("magic_ui_cache.json")
}

fn default_generation_timeout_millis() -> u64 {
    30_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            cache_path: default_cache_path(),
            default_provider: None,
            generation_timeout_millis: default_generation_timeout_millis(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("MAGICUI"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}
