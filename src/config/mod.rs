mod types;

pub use types::*;

use crate::Result;
use std::env;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "saju-pm.yaml";

/// Loads configuration from `path`, `CONFIG_PATH`, or `saju-pm.yaml`.
///
/// A missing default file yields the built-in defaults; an explicitly named
/// file must exist. `SAJU_PM_BASE_URL` overrides `api.base_url`.
pub async fn load(path: Option<&Path>) -> Result<Config> {
    let explicit = path
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| env::var("CONFIG_PATH").ok());

    let mut config = match explicit {
        Some(config_path) => load_from(&config_path).await?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(DEFAULT_CONFIG_PATH).await?,
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    if let Ok(base_url) = env::var("SAJU_PM_BASE_URL") {
        debug!("Overriding api.base_url from SAJU_PM_BASE_URL");
        config.api.base_url = base_url;
    }

    config.validate()?;
    Ok(config)
}

/// Parses and validates a YAML configuration file.
pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config = parse(&config_str)?;

    Ok(config)
}

pub fn parse(yaml: &str) -> Result<Config> {
    // an empty document deserializes as null
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
