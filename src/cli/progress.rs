//! Console progress display for extraction runs.

use std::sync::Mutex;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ocr::{ExtractionAttempt, ExtractionObserver, ExtractionOutcome, Stage, Strategy};

/// Observer that shows a spinner per attempt and a status line per result.
#[derive(Default)]
pub struct ConsoleObserver {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ExtractionObserver for ConsoleObserver {
    fn classified(&self, strategy: Strategy) {
        println!("  {:<12} {}", "Strategy:", style(strategy).cyan());
    }

    fn stage_started(&self, stage: Stage, strategy: Strategy) {
        if stage != Stage::Primary {
            println!(
                "\n{} {} ({} strategy)",
                style("→").yellow(),
                style(stage).bold(),
                strategy
            );
        }
    }

    fn attempt_started(&self, model: &str, strategy: Strategy, _stage: Stage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("{} ({})", model, strategy));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn attempt_finished(&self, attempt: &ExtractionAttempt) {
        self.clear_spinner();

        let label = format!("{} ({})", attempt.model, attempt.strategy);
        let secs = attempt.elapsed.as_secs();
        if attempt.valid {
            println!(
                "  {} {} {}",
                style("✓").green(),
                label,
                style(format!("{} chars, {}s", attempt.char_count(), secs)).dim()
            );
        } else if let Some(error) = &attempt.error {
            println!("  {} {} {}", style("✗").red(), label, style(error).dim());
        } else {
            println!(
                "  {} {} {}",
                style("✗").red(),
                label,
                style(format!("rejected output ({} chars)", attempt.char_count())).dim()
            );
        }
    }

    fn finished(&self, outcome: &ExtractionOutcome) {
        self.clear_spinner();
        if let ExtractionOutcome::Exhausted { attempts } = outcome {
            println!(
                "\n{} No usable text after {} attempts",
                style("✗").red(),
                attempts
            );
        }
    }
}
