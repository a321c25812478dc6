//! Inference backend abstraction.
//!
//! The decision engine only ever talks to a vision model through
//! [`InferenceBackend`]. The production implementation is the Ollama
//! client in `crate::llm`; tests substitute a scripted backend.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::GenerateOptions;

/// Errors from inference backends and the extraction pipeline.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("{model} timed out after {secs}s")]
    Timeout { model: String, secs: u64 },

    #[error("{0} returned an empty response")]
    EmptyResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No vision models available: {0}")]
    NoModelsAvailable(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single generation request against a vision model.
#[derive(Debug, Clone)]
pub struct InferenceRequest<'a> {
    /// Backend model identifier (e.g. "qwen2.5vl:7b").
    pub model: &'a str,
    /// Instruction text sent alongside the image.
    pub prompt: &'a str,
    /// Base64-encoded image bytes.
    pub image: &'a str,
    /// Sampling and length options.
    pub options: &'a GenerateOptions,
    /// Wall-clock bound for the whole request.
    pub timeout: Duration,
}

/// Capability interface for a hosted vision-language model service.
///
/// Implementations must not retry internally: a failed request is reported
/// once and the caller decides which (model, strategy) pair to try next.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// List the model identifiers installed on the backend.
    async fn list_models(&self) -> Result<Vec<String>, OcrError>;

    /// Run one generation request and return the generated text.
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, OcrError>;
}
