use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Upstream credentials and defaults, loaded once at startup.
///
/// Keys come from the environment first (`RAPIDAPI_KEY`, `GEMINI_API_KEY`),
/// then from `~/.config/ytq/config.toml`. They are never compiled in.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub rapidapi_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytq/config.toml if it exists
    pub fn load() -> eyre::Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Key for the transcript upstream; env var takes priority
    pub fn rapidapi_key(&self) -> Result<String> {
        credential("RAPIDAPI_KEY", self.rapidapi_key.as_deref())
    }

    /// Key for the generative upstream; env var takes priority
    pub fn gemini_api_key(&self) -> Result<String> {
        credential("GEMINI_API_KEY", self.gemini_api_key.as_deref())
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }
}

fn credential(env_var: &str, configured: Option<&str>) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    if let Some(value) = configured {
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
    warn!("No credential found: set {env_var} or add it to {}", config_path().display());
    Err(ServiceError::AuthError)
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytq")
        .join("config.toml")
}
