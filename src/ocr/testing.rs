//! Scripted inference backend for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::{InferenceBackend, InferenceRequest, OcrError};
use super::classifier::CLASSIFY_PROMPT;
use super::strategy::Strategy;

/// What a recorded request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Probe,
    Extract(Strategy),
    Other,
}

/// One request seen by the scripted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub model: String,
    pub kind: CallKind,
}

impl Call {
    pub fn extract(model: &str, strategy: Strategy) -> Self {
        Self {
            model: model.to_string(),
            kind: CallKind::Extract(strategy),
        }
    }
}

type Responder = Box<dyn Fn(&str, CallKind) -> Result<String, OcrError> + Send + Sync>;

/// Backend that answers from a closure and records every call.
pub struct ScriptedBackend {
    installed: Option<Vec<String>>,
    responder: Responder,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new<F>(installed: &[&str], responder: F) -> Self
    where
        F: Fn(&str, CallKind) -> Result<String, OcrError> + Send + Sync + 'static,
    {
        Self {
            installed: Some(installed.iter().map(|s| s.to_string()).collect()),
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A backend whose model listing fails as if the server were down.
    pub fn unreachable() -> Self {
        Self {
            installed: None,
            responder: Box::new(|_, _| Err(OcrError::Connection("refused".to_string()))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn extraction_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c.kind, CallKind::Extract(_)))
            .collect()
    }
}

fn kind_of(prompt: &str) -> CallKind {
    if prompt == CLASSIFY_PROMPT {
        return CallKind::Probe;
    }
    Strategy::ALL
        .into_iter()
        .find(|s| s.prompt() == prompt)
        .map(CallKind::Extract)
        .unwrap_or(CallKind::Other)
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn list_models(&self) -> Result<Vec<String>, OcrError> {
        self.installed
            .clone()
            .ok_or_else(|| OcrError::Connection("connection refused".to_string()))
    }

    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, OcrError> {
        let kind = kind_of(request.prompt);
        self.calls.lock().unwrap().push(Call {
            model: request.model.to_string(),
            kind,
        });
        (self.responder)(request.model, kind)
    }
}
