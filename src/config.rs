//! Configuration loader — merges the .env file, config.toml, and env vars.

use common::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

use offer_strategy::OfferPolicy;

/// Top-level offer bot configuration. Everything has a sensible
/// default; config.toml only needs the keys being overridden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferBotConfig {
    /// Motivation thresholds, per-tier terms, and cost-model rates.
    #[serde(default)]
    pub policy: OfferPolicy,

    /// Directory for analysis journal files. Empty = auto-resolve
    /// (env var, then repo root, then cwd).
    #[serde(default)]
    pub journal_dir: String,
}

/// Load bot configuration from the environment and an optional
/// config file.
pub fn load_config() -> Result<OfferBotConfig, Error> {
    // 1. Load .env from the project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = OfferBotConfig::default();

    // 3. Merge config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Env vars win.
    if let Ok(dir) = std::env::var("JOURNAL_DIR") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            config.journal_dir = trimmed.to_string();
        }
    }

    Ok(config)
}
