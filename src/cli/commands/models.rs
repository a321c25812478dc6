//! Model availability listing.

use console::style;

use crate::config::Settings;
use crate::llm::OllamaClient;
use crate::ocr::{InferenceBackend, ModelRegistry};

/// Show each candidate model with its install status and timeout.
pub async fn cmd_list_models(settings: &Settings) -> anyhow::Result<()> {
    let client = OllamaClient::new(settings.ollama.clone())?;
    let catalog = &settings.models;

    println!("\n{}", style("Vision Model Status").bold());
    println!("{}", "-".repeat(60));
    println!("  {:<14} {}", "Endpoint:", settings.ollama.endpoint);

    match client.version().await {
        Ok(version) => println!("  {:<14} {}", "Ollama:", style(version).green()),
        Err(e) => {
            println!("  {:<14} {}", "Ollama:", style("unreachable").red());
            anyhow::bail!("cannot reach {}: {}", settings.ollama.endpoint, e);
        }
    }

    let installed = client.list_models().await?;
    let registry = ModelRegistry::from_installed(catalog, &installed);

    println!("\n{}", style("Candidates (priority order):").cyan());
    for name in &catalog.candidates {
        let status = if registry.contains(name) {
            style("✓ installed").green()
        } else {
            style("✗ missing").red()
        };
        let timeout = format!("{}m", catalog.timeout_for(name).as_secs() / 60);
        println!("  {:<28} {:<6} {}", name, timeout, status);
    }

    if let Some(primary) = registry.primary_ocr_model(catalog) {
        println!("\n  {:<14} {}", "OCR model:", style(&primary.name).cyan());
    }
    if let Some(fast) = registry.fastest_model(catalog) {
        println!("  {:<14} {}", "Classifier:", style(&fast.name).cyan());
    }

    if registry.is_empty() {
        if let Some(first) = catalog.candidates.first() {
            println!(
                "\n  {}",
                style(format!("Install one with: ollama pull {}", first)).dim()
            );
        }
        anyhow::bail!("no candidate vision models are installed");
    }

    Ok(())
}
