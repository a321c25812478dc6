//! Layout classification probe.
//!
//! One cheap request to a fast model decides the primary strategy. The
//! probe never fails the pipeline: any error yields the conservative
//! DETAILED strategy.

use std::fmt;

use tracing::{debug, info, warn};

use super::backend::{InferenceBackend, InferenceRequest};
use super::catalog::ModelCatalog;
use super::registry::ModelRegistry;
use super::strategy::Strategy;
use crate::llm::GenerateOptions;

/// Instruction for the classification probe.
pub const CLASSIFY_PROMPT: &str = "Analyze this image and describe its layout and content type briefly.

Focus on:
1. Is this a table/structured document with rows and columns?
2. Is this a form with fields and labels?
3. Is this regular text/paragraph content?
4. Are there multiple sections or complex layouts?
5. Is the text densely packed or sparse?

Respond with just one of these categories: TABLE, FORM, PARAGRAPH, COMPLEX, or SIMPLE";

/// Coarse layout category of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentClass {
    Table,
    Form,
    Paragraph,
    Complex,
    Simple,
    Unknown,
}

impl ContentClass {
    /// Resolve a raw probe answer. Keywords are checked in priority order
    /// TABLE > FORM > COMPLEX > PARAGRAPH > SIMPLE.
    pub fn from_answer(answer: &str) -> Self {
        let answer = answer.trim().to_uppercase();
        if answer.contains("TABLE") {
            ContentClass::Table
        } else if answer.contains("FORM") {
            ContentClass::Form
        } else if answer.contains("COMPLEX") {
            ContentClass::Complex
        } else if answer.contains("PARAGRAPH") {
            ContentClass::Paragraph
        } else if answer.contains("SIMPLE") {
            ContentClass::Simple
        } else {
            ContentClass::Unknown
        }
    }

    /// Fixed class-to-strategy table. Anything unrecognised gets DETAILED.
    pub fn strategy(&self) -> Strategy {
        match self {
            ContentClass::Table => Strategy::Table,
            ContentClass::Paragraph => Strategy::General,
            ContentClass::Form
            | ContentClass::Complex
            | ContentClass::Simple
            | ContentClass::Unknown => Strategy::Detailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentClass::Table => "TABLE",
            ContentClass::Form => "FORM",
            ContentClass::Paragraph => "PARAGRAPH",
            ContentClass::Complex => "COMPLEX",
            ContentClass::Simple => "SIMPLE",
            ContentClass::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ContentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues the probe and maps its answer to a strategy.
pub struct ContentClassifier<'a> {
    backend: &'a dyn InferenceBackend,
    registry: &'a ModelRegistry,
    catalog: &'a ModelCatalog,
    options: GenerateOptions,
}

impl<'a> ContentClassifier<'a> {
    pub fn new(
        backend: &'a dyn InferenceBackend,
        registry: &'a ModelRegistry,
        catalog: &'a ModelCatalog,
    ) -> Self {
        Self {
            backend,
            registry,
            catalog,
            options: GenerateOptions::probe(),
        }
    }

    /// Categorise the image layout. Returns `Unknown` on any failure.
    pub async fn probe(&self, image_base64: &str) -> ContentClass {
        let Some(model) = self.registry.fastest_model(self.catalog) else {
            warn!("No model available for classification, using default strategy");
            return ContentClass::Unknown;
        };
        debug!("Classifying image with {}", model.name);

        let request = InferenceRequest {
            model: &model.name,
            prompt: CLASSIFY_PROMPT,
            image: image_base64,
            options: &self.options,
            timeout: self.catalog.probe_timeout(),
        };

        match self.backend.infer(&request).await {
            Ok(answer) => {
                let class = ContentClass::from_answer(&answer);
                info!(
                    "Classified image as {} (answer: {:?})",
                    class,
                    answer.trim()
                );
                class
            }
            Err(e) => {
                warn!("Image classification failed, using default strategy: {}", e);
                ContentClass::Unknown
            }
        }
    }

    /// Choose the primary strategy for the image.
    pub async fn classify(&self, image_base64: &str) -> Strategy {
        self.probe(image_base64).await.strategy()
    }
}
