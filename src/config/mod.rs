mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Loads `.env`, the YAML file at `CONFIG_PATH` (default `config.yaml`), and
/// then the environment overrides. A missing YAML file means all defaults.
pub async fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from: {}", path.display());
    }

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_from(&config_path).await?;

    apply_env_overrides(config, |key| env::var(key).ok())
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies `HF_API_KEY`, `PORT` and `STATIC_DIR` on top of `config`, then
/// validates the result. `lookup` is `std::env::var` outside of tests.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("HF_API_KEY") {
        config.inference.api_key = api_key;
    }

    if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    if let Some(static_dir) = lookup("STATIC_DIR") {
        config.server.static_dir = static_dir;
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.retry.max_attempts == 0 {
        return Err(Error::config("retry.max_attempts must be at least 1"));
    }
    if config.inference.model.is_empty() {
        return Err(Error::config("inference.model must not be empty"));
    }
    Ok(())
}
