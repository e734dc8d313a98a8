use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("API key not found. Set OPENROUTER_API_KEY or configure ~/.config/dormcraft/config.toml")]
    ApiKeyNotFound,

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] dormcraft_core::CatalogError),

    #[error("OpenRouter error: {0}")]
    OpenRouter(#[from] dormcraft_openrouter::OpenRouterError),
}

pub fn read_file(path: &std::path::Path) -> Result<String, ToolError> {
    std::fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })
}
