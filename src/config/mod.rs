mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH`, falling back to `config.yaml`.
pub async fn load() -> Result<Config> {
    match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await,
        Err(_) => load_optional(DEFAULT_CONFIG_PATH).await,
    }
}

/// Loads an explicitly named file; a missing file is an error.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse(&config_str)
}

/// Loads the default file if it exists, otherwise returns defaults.
pub async fn load_optional(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => {
            debug!("Loading configuration from: {}", path.display());
            parse(&config_str)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(apply_env_overrides(Config::default()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = if config_str.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(config_str)?
    };

    Ok(apply_env_overrides(config))
}

fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(url) = env::var("CODE_ITERATOR_URL") {
        if !url.trim().is_empty() {
            debug!("Service URL overridden by CODE_ITERATOR_URL: {}", url);
            config.service.base_url = url;
        }
    }
    config
}
