//! Command-line interface.

mod commands;
pub mod helpers;
mod progress;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::ocr::Strategy;

pub use progress::ConsoleObserver;

#[derive(Parser)]
#[command(name = "vocr")]
#[command(about = "Extract text from document images with local vision models")]
#[command(version)]
pub struct Cli {
    /// Input image path
    #[arg(required_unless_present = "list_models")]
    image: Option<PathBuf>,

    /// Write the result to this text file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ollama server URL (overrides config and environment)
    #[arg(long)]
    ollama_url: Option<String>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip classification and start with this strategy (general, table, detailed)
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Show candidate models and whether they are installed, then exit
    #[arg(long)]
    list_models: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and run.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).await?;
    if let Some(url) = &cli.ollama_url {
        settings = settings.with_endpoint(url);
    }

    if cli.list_models {
        return commands::cmd_list_models(&settings).await;
    }

    match cli.image {
        Some(image) => {
            commands::cmd_extract(&settings, &image, cli.output.as_deref(), cli.strategy).await
        }
        None => anyhow::bail!("an image path is required"),
    }
}
