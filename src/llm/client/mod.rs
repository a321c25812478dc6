//! Ollama client for vision model inference.
//!
//! Talks to the Ollama HTTP API (`/api/tags`, `/api/version`,
//! `/api/generate`). Requests are never retried here; the extraction
//! engine decides what to try next.

mod config;
mod options;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::OllamaConfig;
pub use options::GenerateOptions;

use crate::ocr::{InferenceBackend, InferenceRequest, OcrError};

/// Timeout for the cheap metadata endpoints.
const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Ollama client implementing [`InferenceBackend`].
pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

/// Ollama generate request format.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: [&'a str; 1],
    stream: bool,
    options: &'a GenerateOptions,
}

/// Ollama generate response format.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
}

impl OllamaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OllamaConfig) -> Result<Self, OcrError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| OcrError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Query the server version; doubles as a reachability check.
    pub async fn version(&self) -> Result<String, OcrError> {
        let resp = self
            .client
            .get(self.config.url("/api/version"))
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
            .map_err(|e| OcrError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(OcrError::Api {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let version: VersionResponse = resp
            .json()
            .await
            .map_err(|e| OcrError::Parse(e.to_string()))?;
        Ok(version.version)
    }

    /// Call `/api/generate` once.
    async fn generate(&self, request: &InferenceRequest<'_>) -> Result<String, OcrError> {
        let body = GenerateRequest {
            model: request.model,
            prompt: request.prompt,
            images: [request.image],
            stream: false,
            options: request.options,
        };

        debug!(
            "POST /api/generate model={} timeout={:?}",
            request.model, request.timeout
        );
        let resp = self
            .client
            .post(self.config.url("/api/generate"))
            .json(&body)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| map_send_error(e, request))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrError::Api { status, body });
        }

        let generated: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| map_send_error(e, request))?;

        let text = generated.response.trim();
        if text.is_empty() {
            return Err(OcrError::EmptyResponse(request.model.to_string()));
        }
        Ok(text.to_string())
    }
}

/// Classify a reqwest failure, keeping timeouts distinct.
fn map_send_error(e: reqwest::Error, request: &InferenceRequest<'_>) -> OcrError {
    if e.is_timeout() {
        OcrError::Timeout {
            model: request.model.to_string(),
            secs: request.timeout.as_secs(),
        }
    } else if e.is_decode() {
        OcrError::Parse(e.to_string())
    } else {
        OcrError::Connection(e.to_string())
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn list_models(&self) -> Result<Vec<String>, OcrError> {
        let resp = self
            .client
            .get(self.config.url("/api/tags"))
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
            .map_err(|e| OcrError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(OcrError::Api {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| OcrError::Parse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, OcrError> {
        if self.config.health_check {
            self.version().await?;
        }
        self.generate(request).await
    }
}
