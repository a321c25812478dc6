//! Backend client for locally hosted vision models.

mod client;

pub use client::{GenerateOptions, OllamaClient, OllamaConfig};
