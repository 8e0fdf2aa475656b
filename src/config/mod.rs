mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variable that overrides `llm.api_key` from the file.
pub const API_KEY_ENV: &str = "LLM_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let mut config = parse(&config_str)?;

    if let Ok(api_key) = env::var(API_KEY_ENV) {
        if !api_key.is_empty() {
            debug!("Using API key from {}", API_KEY_ENV);
            config.llm.api_key = api_key;
        }
    }

    config.validate()?;
    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(config_str)?)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if self.server.port == 0 {
            return Err(Error::config("server.port must be non-zero"));
        }
        if self.estimation.timeout_secs == 0 {
            return Err(Error::config("estimation.timeout_secs must be non-zero"));
        }
        Ok(())
    }
}
