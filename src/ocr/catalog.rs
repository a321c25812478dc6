//! Model priority lists and per-model timeout policy.
//!
//! Search order is configuration data so it can be audited and overridden
//! from the config file without touching the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout rule: any model whose identifier contains `pattern` gets `secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutRule {
    pub pattern: String,
    pub secs: u64,
}

impl TimeoutRule {
    pub fn new(pattern: &str, secs: u64) -> Self {
        Self {
            pattern: pattern.to_string(),
            secs,
        }
    }
}

/// Ordered model lists and timeout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Candidate models in accuracy-first priority order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    /// Preferred models for the primary extraction attempt.
    #[serde(default = "default_ocr_priority")]
    pub ocr_priority: Vec<String>,
    /// Cheap models used for the classification probe.
    #[serde(default = "default_fast_models")]
    pub fast_models: Vec<String>,
    /// Timeout rules, first match wins.
    #[serde(default = "default_timeouts")]
    pub timeouts: Vec<TimeoutRule>,
    /// Timeout for models no rule matches.
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
    /// Timeout for the classification probe.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_candidates() -> Vec<String> {
    [
        "qwen2.5vl:7b",
        "llama3.2-vision:11b",
        "llava-llama3:latest",
        "qwen2.5vl:3b",
        "granite3.2-vision:latest",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ocr_priority() -> Vec<String> {
    [
        "qwen2.5vl:7b",
        "qwen2.5vl:3b",
        "llava-llama3:latest",
        "llama3.2-vision:11b",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fast_models() -> Vec<String> {
    vec![
        "granite3.2-vision:latest".to_string(),
        "qwen2.5vl:3b".to_string(),
    ]
}

fn default_timeouts() -> Vec<TimeoutRule> {
    vec![
        TimeoutRule::new("qwen2.5vl:7b", 1200),
        TimeoutRule::new("llama3.2-vision:11b", 1500),
        TimeoutRule::new("llava-llama3", 900),
    ]
}

fn default_timeout_secs() -> u64 {
    720
}

fn default_probe_timeout_secs() -> u64 {
    30
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            ocr_priority: default_ocr_priority(),
            fast_models: default_fast_models(),
            timeouts: default_timeouts(),
            default_timeout_secs: default_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl ModelCatalog {
    /// Upper bound for one extraction request against `model`.
    pub fn timeout_for(&self, model: &str) -> Duration {
        let secs = self
            .timeouts
            .iter()
            .find(|rule| model.contains(&rule.pattern))
            .map(|rule| rule.secs)
            .unwrap_or(self.default_timeout_secs);
        Duration::from_secs(secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
