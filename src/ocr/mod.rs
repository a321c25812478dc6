//! Vision-model text extraction engine.
//!
//! Extracts text from document images by delegating to hosted vision
//! models and searching (model × strategy) combinations until a result
//! passes validation:
//!
//! 1. **Registry**: candidate models intersected with what the backend has installed
//! 2. **Classifier**: one cheap probe picks the primary strategy
//! 3. **Primary attempt**: the preferred OCR model with that strategy
//! 4. **Secondary sweep**: every other model with the same strategy
//! 5. **Backup sweep**: every model with the backup strategy
//!
//! The backend is abstracted behind [`InferenceBackend`] so the search can
//! be driven by a scripted implementation in tests.

mod backend;
mod catalog;
mod classifier;
mod fallback;
mod image;
mod observer;
mod registry;
mod strategy;
mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{InferenceBackend, InferenceRequest, OcrError};
pub use catalog::{ModelCatalog, TimeoutRule};
pub use classifier::{ContentClass, ContentClassifier, CLASSIFY_PROMPT};
pub use fallback::{ExtractionAttempt, ExtractionOutcome, FallbackOrchestrator, Provenance, Stage};
pub use image::ImagePayload;
pub use observer::{ExtractionObserver, NoopObserver, TracingObserver};
pub use registry::{ModelHandle, ModelRegistry};
pub use strategy::Strategy;
pub use validator::{ResultValidator, ValidatorConfig};
