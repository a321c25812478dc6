//! Progress hooks for the extraction search.
//!
//! The orchestrator reports what it is doing through [`ExtractionObserver`]
//! instead of printing, so the CLI, tests and library users can each decide
//! how to present progress.

use tracing::{info, warn};

use super::fallback::{ExtractionAttempt, ExtractionOutcome, Stage};
use super::strategy::Strategy;

/// Receives progress events from the orchestrator. All hooks default to no-ops.
pub trait ExtractionObserver: Send + Sync {
    /// Classification finished and the primary strategy is known.
    fn classified(&self, _strategy: Strategy) {}

    /// A new search stage begins.
    fn stage_started(&self, _stage: Stage, _strategy: Strategy) {}

    /// An inference request is about to be issued.
    fn attempt_started(&self, _model: &str, _strategy: Strategy, _stage: Stage) {}

    /// An inference request completed (successfully or not).
    fn attempt_finished(&self, _attempt: &ExtractionAttempt) {}

    /// The search reached a terminal state.
    fn finished(&self, _outcome: &ExtractionOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {}

/// Observer that narrates progress as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn classified(&self, strategy: Strategy) {
        info!("Selected strategy: {}", strategy);
    }

    fn stage_started(&self, stage: Stage, strategy: Strategy) {
        info!("Starting {} with {} strategy", stage, strategy);
    }

    fn attempt_started(&self, model: &str, strategy: Strategy, _stage: Stage) {
        info!("Running {} ({} strategy)", model, strategy);
    }

    fn attempt_finished(&self, attempt: &ExtractionAttempt) {
        if attempt.valid {
            info!(
                "{} produced valid text ({} chars)",
                attempt.model,
                attempt.char_count()
            );
        } else if let Some(error) = &attempt.error {
            warn!("{} ({}) failed: {}", attempt.model, attempt.strategy, error);
        } else {
            warn!(
                "{} ({}) returned invalid text ({} chars)",
                attempt.model,
                attempt.strategy,
                attempt.char_count()
            );
        }
    }

    fn finished(&self, outcome: &ExtractionOutcome) {
        match outcome {
            ExtractionOutcome::Success { provenance, text } => {
                info!("Extraction succeeded via {} ({} chars)", provenance, text.chars().count())
            }
            ExtractionOutcome::Exhausted { attempts } => {
                warn!("All {} model/strategy combinations failed", attempts)
            }
        }
    }
}
