//! Settings for the extraction engine.
//!
//! Settings come from a TOML file (explicit path, or discovered by `prefer`
//! under the name `vocr`), then environment overrides, then CLI flags.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::OllamaConfig;
use crate::ocr::{ModelCatalog, OcrError, ValidatorConfig};

/// Name used for config file discovery (`vocr.toml` in the standard locations).
pub const CONFIG_NAME: &str = "vocr";

/// Complete engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub models: ModelCatalog,
    #[serde(default)]
    pub validator: ValidatorConfig,
}

impl Settings {
    /// Load settings, then apply environment overrides.
    ///
    /// An explicit path must exist. Without one, `prefer` looks for a `vocr`
    /// config file and defaults are used when none is found.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, OcrError> {
        let settings = match explicit {
            Some(path) => Self::from_file(path).await?,
            None => Self::discover().await?,
        };
        Ok(settings.with_env_overrides())
    }

    /// Use prefer for file discovery, then parse with serde.
    async fn discover() -> Result<Self, OcrError> {
        match prefer::load(CONFIG_NAME).await {
            Ok(found) => match found.source_path() {
                Some(path) => Self::from_file(path).await,
                None => Ok(Self::default()),
            },
            Err(_) => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a TOML config file.
    pub async fn from_file(path: &Path) -> Result<Self, OcrError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OcrError::Config(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_toml(&content)
            .map_err(|e| OcrError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_env_overrides(mut self) -> Self {
        self.ollama = self.ollama.with_env_overrides();
        self
    }

    /// Override the backend URL (from the command line).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.ollama = self.ollama.with_endpoint(endpoint);
        self
    }
}
