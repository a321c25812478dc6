//! Text extraction command.

use std::path::Path;
use std::sync::Arc;

use console::style;

use crate::cli::helpers::{print_result, write_result_file};
use crate::cli::ConsoleObserver;
use crate::config::Settings;
use crate::llm::OllamaClient;
use crate::ocr::{
    ExtractionOutcome, FallbackOrchestrator, ImagePayload, ModelRegistry, ResultValidator,
    Strategy,
};

/// Extract text from one image, optionally saving it to `output`.
///
/// Startup problems (unreadable image, unreachable backend, no models)
/// and an exhausted search are both returned as errors.
pub async fn cmd_extract(
    settings: &Settings,
    image_path: &Path,
    output: Option<&Path>,
    strategy: Option<Strategy>,
) -> anyhow::Result<()> {
    println!(
        "{} {}",
        style("Vision OCR:").bold(),
        style(image_path.display()).cyan()
    );

    let image = ImagePayload::from_path(image_path)?;

    let client = Arc::new(OllamaClient::new(settings.ollama.clone())?);
    let registry = ModelRegistry::discover(&*client, &settings.models).await?;
    println!(
        "  {:<12} {}",
        "Models:",
        style(registry.names().join(", ")).dim()
    );

    let orchestrator = FallbackOrchestrator::new(
        client,
        registry,
        settings.models.clone(),
        ResultValidator::new(settings.validator),
    )
    .with_observer(Arc::new(ConsoleObserver::new()));

    let outcome = match strategy {
        Some(strategy) => orchestrator.extract_with(&image, strategy).await,
        None => orchestrator.extract(&image).await,
    };

    match outcome {
        ExtractionOutcome::Success { text, provenance } => {
            print_result(&provenance, &text);
            if let Some(path) = output {
                write_result_file(path, &provenance, &text, chrono::Local::now())?;
                println!(
                    "\n{} Result saved to {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
            Ok(())
        }
        ExtractionOutcome::Exhausted { attempts } => {
            anyhow::bail!(
                "text extraction failed: all {} model/strategy combinations were rejected",
                attempts
            )
        }
    }
}
