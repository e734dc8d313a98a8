use std::path::PathBuf;
use std::time::Duration;

use dormcraft_openrouter::DEFAULT_MODEL;
use serde::Deserialize;

use crate::error::ToolError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SHARE_BASE_URL: &str = "https://dormcraft.app";

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    pub openrouter_api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub share_base_url: Option<String>,
}

impl Config {
    pub fn model(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn timeout(&self, cli_secs: Option<u64>) -> Duration {
        Duration::from_secs(
            cli_secs
                .or(self.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn share_base_url(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.share_base_url.clone())
            .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_string())
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dormcraft").join("config.toml"))
}

/// Reads the user config. A missing file yields the defaults; a malformed
/// one is an error.
pub fn load_config() -> Result<Config, ToolError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };

    let Ok(content) = std::fs::read_to_string(path) else {
        return Ok(Config::default());
    };

    Ok(toml::from_str(&content)?)
}

pub fn load_api_key(config: &Config) -> Result<String, ToolError> {
    resolve_api_key(std::env::var("OPENROUTER_API_KEY").ok(), config)
}

fn resolve_api_key(env: Option<String>, config: &Config) -> Result<String, ToolError> {
    // Environment wins over the config file
    if let Some(key) = env.filter(|k| !k.is_empty()) {
        return Ok(key);
    }

    config
        .openrouter_api_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or(ToolError::ApiKeyNotFound)
}
