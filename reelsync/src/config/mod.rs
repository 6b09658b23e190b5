//! Configuration file loading.
//!
//! `.env` is loaded first, then `${VAR}` references in the TOML text are
//! expanded from the environment before parsing.

pub mod env;
pub mod settings;

use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

pub use env::{expand_env, expand_vars};
pub use settings::{
    AppConfig, JellyfinSettings, RunnerSettings, SchedulerSettings, TmdbSettings, TraktSettings,
};

/// Default configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Load, expand, parse and validate a configuration file.
pub async fn load(path: &Path) -> Result<AppConfig> {
    if let Ok(dotenv) = dotenvy::dotenv() {
        debug!(path = %dotenv.display(), "Loaded .env");
    }

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = parse(&raw, |name| std::env::var(name).ok())?;
    config.validate()?;
    Ok(config)
}

/// Expand variables with `lookup` and parse.
pub fn parse<F>(raw: &str, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = expand_vars(raw, lookup)?;
    AppConfig::from_toml(&expanded)
}
