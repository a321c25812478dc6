//! Document text extraction through locally hosted vision-language models.
//!
//! The [`ocr`] module holds the decision engine (classification, validation
//! and the fallback search); [`llm`] provides the Ollama backend.

pub mod cli;
pub mod config;
pub mod llm;
pub mod ocr;
