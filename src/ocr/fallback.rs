//! Fallback search over (model, strategy) combinations.
//!
//! The orchestrator classifies the image, tries the primary OCR model with
//! the classified strategy, sweeps the remaining models with the same
//! strategy, and finally sweeps every model with the backup strategy. The
//! first result that passes validation wins.
//!
//! Inference failures never escape this module: each one is recorded as an
//! invalid attempt and the search moves on to the next candidate.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::backend::{InferenceBackend, InferenceRequest};
use super::catalog::ModelCatalog;
use super::classifier::ContentClassifier;
use super::image::ImagePayload;
use super::observer::{ExtractionObserver, TracingObserver};
use super::registry::{ModelHandle, ModelRegistry};
use super::strategy::Strategy;
use super::validator::ResultValidator;
use crate::llm::GenerateOptions;

/// Phase of the search an attempt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Primary OCR model with the classified strategy.
    Primary,
    /// Remaining models with the classified strategy.
    Secondary,
    /// All models with the backup strategy.
    Backup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Primary => write!(f, "primary attempt"),
            Stage::Secondary => write!(f, "secondary sweep"),
            Stage::Backup => write!(f, "backup sweep"),
        }
    }
}

/// Which model and strategy produced an accepted extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub model: String,
    pub strategy: Strategy,
    pub stage: Stage,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Stage::Primary => write!(f, "{} ({})", self.model, self.strategy),
            Stage::Secondary | Stage::Backup => write!(f, "{}_{}", self.model, self.strategy),
        }
    }
}

/// Record of one inference call and its validity.
#[derive(Debug, Clone)]
pub struct ExtractionAttempt {
    pub model: String,
    pub strategy: Strategy,
    pub stage: Stage,
    /// Raw text returned by the backend, if any.
    pub text: Option<String>,
    pub valid: bool,
    /// Backend error message when the call itself failed.
    pub error: Option<String>,
    pub elapsed: Duration,
}

impl ExtractionAttempt {
    pub fn char_count(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }
}

/// Terminal result of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// A validated extraction and where it came from.
    Success { text: String, provenance: Provenance },
    /// Every combination in the search order failed.
    Exhausted { attempts: usize },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Success { text, .. } => Some(text),
            ExtractionOutcome::Exhausted { .. } => None,
        }
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        match self {
            ExtractionOutcome::Success { provenance, .. } => Some(provenance),
            ExtractionOutcome::Exhausted { .. } => None,
        }
    }
}

/// Per-run bookkeeping: pairs already tried and the attempt count.
#[derive(Default)]
struct SearchState {
    tried: HashSet<(String, Strategy)>,
    attempts: usize,
}

/// Drives classification and the fallback search for one backend session.
pub struct FallbackOrchestrator {
    backend: Arc<dyn InferenceBackend>,
    registry: ModelRegistry,
    catalog: ModelCatalog,
    validator: ResultValidator,
    observer: Arc<dyn ExtractionObserver>,
    options: GenerateOptions,
}

impl FallbackOrchestrator {
    /// Create an orchestrator over an already discovered registry.
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        registry: ModelRegistry,
        catalog: ModelCatalog,
        validator: ResultValidator,
    ) -> Self {
        Self {
            backend,
            registry,
            catalog,
            validator,
            observer: Arc::new(TracingObserver),
            options: GenerateOptions::extraction(),
        }
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Classify the image and search for an acceptable extraction.
    ///
    /// Always returns exactly one outcome; backend failures are absorbed.
    pub async fn extract(&self, image: &ImagePayload) -> ExtractionOutcome {
        let classifier =
            ContentClassifier::new(&*self.backend, &self.registry, &self.catalog);
        let optimal = classifier.classify(image.base64()).await;
        self.observer.classified(optimal);

        self.extract_with(image, optimal).await
    }

    /// Run the search with a known primary strategy, skipping classification.
    pub async fn extract_with(
        &self,
        image: &ImagePayload,
        optimal: Strategy,
    ) -> ExtractionOutcome {
        let outcome = self.search(image, optimal).await;
        self.observer.finished(&outcome);
        outcome
    }

    async fn search(&self, image: &ImagePayload, optimal: Strategy) -> ExtractionOutcome {
        let mut state = SearchState::default();

        let Some(primary) = self.registry.primary_ocr_model(&self.catalog) else {
            return ExtractionOutcome::Exhausted { attempts: 0 };
        };

        self.observer.stage_started(Stage::Primary, optimal);
        if let Some(outcome) = self
            .sweep(image, [primary], optimal, Stage::Primary, &mut state)
            .await
        {
            return outcome;
        }

        self.observer.stage_started(Stage::Secondary, optimal);
        let others = self
            .registry
            .available_models()
            .iter()
            .filter(|m| m.name != primary.name);
        if let Some(outcome) = self
            .sweep(image, others, optimal, Stage::Secondary, &mut state)
            .await
        {
            return outcome;
        }

        let backup = optimal.backup();
        debug!("{} failed on every model, backing up to {}", optimal, backup);
        self.observer.stage_started(Stage::Backup, backup);
        if let Some(outcome) = self
            .sweep(
                image,
                self.registry.available_models(),
                backup,
                Stage::Backup,
                &mut state,
            )
            .await
        {
            return outcome;
        }

        ExtractionOutcome::Exhausted {
            attempts: state.attempts,
        }
    }

    /// Try `strategy` on each model in order, stopping at the first valid result.
    async fn sweep<'m>(
        &self,
        image: &ImagePayload,
        models: impl IntoIterator<Item = &'m ModelHandle>,
        strategy: Strategy,
        stage: Stage,
        state: &mut SearchState,
    ) -> Option<ExtractionOutcome> {
        for model in models {
            if !state.tried.insert((model.name.clone(), strategy)) {
                debug!("Skipping {} ({}), already tried", model.name, strategy);
                continue;
            }
            state.attempts += 1;

            let attempt = self.attempt(image, model, strategy, stage).await;
            self.observer.attempt_finished(&attempt);

            if attempt.valid {
                return Some(ExtractionOutcome::Success {
                    text: attempt.text.unwrap_or_default(),
                    provenance: Provenance {
                        model: attempt.model,
                        strategy,
                        stage,
                    },
                });
            }
        }
        None
    }

    /// Issue one inference call and judge the result.
    async fn attempt(
        &self,
        image: &ImagePayload,
        model: &ModelHandle,
        strategy: Strategy,
        stage: Stage,
    ) -> ExtractionAttempt {
        self.observer.attempt_started(&model.name, strategy, stage);

        let request = InferenceRequest {
            model: &model.name,
            prompt: strategy.prompt(),
            image: image.base64(),
            options: &self.options,
            timeout: model.timeout,
        };

        let start = Instant::now();
        let (text, error) = match self.backend.infer(&request).await {
            Ok(text) => (Some(text), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let valid = self.validator.is_valid_opt(text.as_deref());

        ExtractionAttempt {
            model: model.name.clone(),
            strategy,
            stage,
            text,
            valid,
            error,
            elapsed: start.elapsed(),
        }
    }
}
