//! Heuristic plausibility check for extracted text.
//!
//! Every fallback decision is gated on [`ResultValidator::is_valid`], so the
//! rule order and thresholds below decide which path the search takes.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whole-text match for numeric noise (digits, whitespace, '.', '%').
static NUMERIC_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s.%]+$").expect("valid regex"));

/// Target-script character (Hangul syllables).
static TARGET_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣]").expect("valid regex"));

/// Two or more consecutive English letters.
static ENGLISH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{2,}").expect("valid regex"));

/// Thresholds for the validator.
///
/// Both values were tuned empirically against observed failure output and
/// should be recalibrated against a representative corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Minimum distinct characters, ignoring ' ', '%' and '.'.
    #[serde(default = "default_min_distinct_chars")]
    pub min_distinct_chars: usize,
    /// Minimum length for text with no recognisable words.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_min_distinct_chars() -> usize {
    5
}

fn default_min_length() -> usize {
    10
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_distinct_chars: default_min_distinct_chars(),
            min_length: default_min_length(),
        }
    }
}

/// Stateless judge of whether an extraction is real text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultValidator {
    config: ValidatorConfig,
}

impl ResultValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate an optional extraction; `None` is never valid.
    pub fn is_valid_opt(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.is_valid(t))
    }

    /// Apply the rules in order; the first decisive rule wins.
    pub fn is_valid(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        let distinct: HashSet<char> = text
            .chars()
            .filter(|c| !matches!(*c, ' ' | '%' | '.'))
            .collect();
        if distinct.len() < self.config.min_distinct_chars {
            return false;
        }

        if NUMERIC_NOISE.is_match(text) {
            return false;
        }

        if TARGET_SCRIPT.is_match(text) || ENGLISH_WORD.is_match(text) {
            return true;
        }

        text.chars().count() >= self.config.min_length
    }
}
