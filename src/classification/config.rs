//! Classifier configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HopliteError, Result};

/// Tuning knobs shared by every classifier.
///
/// `weight` and `assumed_probability` parameterize the weighted probability
/// estimator: a feature nobody has seen yet scores exactly
/// `assumed_probability`, and every observation moves the estimate towards the
/// empirical probability with `weight` acting as the prior's pseudo-count.
/// The word-length bounds configure the default feature extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Pseudo-count given to the assumed probability.
    pub weight: f64,
    /// Probability assumed for a feature with no observations.
    pub assumed_probability: f64,
    /// Shortest word (in characters) kept as a feature.
    pub min_word_length: usize,
    /// Longest word (in characters) kept as a feature.
    pub max_word_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            weight: 1.0,
            assumed_probability: 0.5,
            min_word_length: 3,
            max_word_length: 19,
        }
    }
}

impl ClassifierConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the prior weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the assumed probability.
    pub fn with_assumed_probability(mut self, assumed_probability: f64) -> Self {
        self.assumed_probability = assumed_probability;
        self
    }

    /// Set the inclusive word-length bounds.
    pub fn with_word_lengths(mut self, min: usize, max: usize) -> Self {
        self.min_word_length = min;
        self.max_word_length = max;
        self
    }

    /// Check that every field is in its valid range.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(HopliteError::invalid_config(format!(
                "weight must be a finite, non-negative number, got {}",
                self.weight
            )));
        }
        if !(0.0..=1.0).contains(&self.assumed_probability) {
            return Err(HopliteError::invalid_config(format!(
                "assumed_probability must be within [0, 1], got {}",
                self.assumed_probability
            )));
        }
        if self.min_word_length == 0 {
            return Err(HopliteError::invalid_config(
                "min_word_length must be at least 1",
            ));
        }
        if self.min_word_length > self.max_word_length {
            return Err(HopliteError::invalid_config(format!(
                "min_word_length ({}) exceeds max_word_length ({})",
                self.min_word_length, self.max_word_length
            )));
        }
        Ok(())
    }
}
