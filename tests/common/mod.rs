//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use visionocr::ocr::{
    ExtractionAttempt, ExtractionObserver, InferenceBackend, InferenceRequest, OcrError, Strategy,
    CLASSIFY_PROMPT,
};

/// A realistic extraction that passes validation.
pub const GOOD_TEXT: &str = "제 3 조 (적용범위) 이 지침은 각급기관에 적용한다.\nArticle 3 Scope";

/// Numeric noise the validator rejects.
pub const NOISE: &str = "12.5% 34.7% 56.1% 78.9%";

/// Recorded request: model plus either the probe or a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub model: String,
    pub strategy: Option<Strategy>,
}

type Script = dyn Fn(&str, Option<Strategy>) -> Result<String, OcrError> + Send + Sync;

/// Backend answering from a closure. `None` strategy means the classification probe.
pub struct ScriptedBackend {
    installed: Option<Vec<String>>,
    script: Box<Script>,
    seen: Mutex<Vec<Seen>>,
}

impl ScriptedBackend {
    pub fn new<F>(installed: &[&str], script: F) -> Arc<Self>
    where
        F: Fn(&str, Option<Strategy>) -> Result<String, OcrError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            installed: Some(installed.iter().map(|s| s.to_string()).collect()),
            script: Box::new(script),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            installed: None,
            script: Box::new(|_, _| Err(OcrError::Connection("offline".to_string()))),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    /// Extraction requests only, as (model, strategy) pairs.
    pub fn extractions(&self) -> Vec<(String, Strategy)> {
        self.seen()
            .into_iter()
            .filter_map(|s| s.strategy.map(|strategy| (s.model, strategy)))
            .collect()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn list_models(&self) -> Result<Vec<String>, OcrError> {
        self.installed
            .clone()
            .ok_or_else(|| OcrError::Connection("connection refused".to_string()))
    }

    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, OcrError> {
        let strategy = if request.prompt == CLASSIFY_PROMPT {
            None
        } else {
            Strategy::ALL
                .into_iter()
                .find(|s| s.prompt() == request.prompt)
        };
        self.seen.lock().unwrap().push(Seen {
            model: request.model.to_string(),
            strategy,
        });
        (self.script)(request.model, strategy)
    }
}

/// Observer that keeps every finished attempt.
#[derive(Default)]
pub struct RecordingObserver {
    pub attempts: Mutex<Vec<ExtractionAttempt>>,
    pub classified: Mutex<Option<Strategy>>,
}

impl ExtractionObserver for RecordingObserver {
    fn classified(&self, strategy: Strategy) {
        *self.classified.lock().unwrap() = Some(strategy);
    }

    fn attempt_finished(&self, attempt: &ExtractionAttempt) {
        self.attempts.lock().unwrap().push(attempt.clone());
    }
}

pub fn pair(model: &str, strategy: Strategy) -> (String, Strategy) {
    (model.to_string(), strategy)
}
