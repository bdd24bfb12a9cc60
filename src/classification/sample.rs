//! Labeled training documents and loading them from disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HopliteError, Result};

/// A document together with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample<C = String> {
    /// Document text.
    pub text: String,
    /// Category label.
    pub category: C,
}

impl<C> TrainingSample<C> {
    /// Create a new training sample.
    pub fn new<S: Into<String>>(text: S, category: C) -> Self {
        TrainingSample {
            text: text.into(),
            category,
        }
    }
}

/// Load training samples from a JSON file.
///
/// Accepts either a JSON array of `{"text": ..., "category": ...}` objects
/// or JSON Lines with one such object per line. Blank lines are skipped.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let content = std::fs::read_to_string(path)?;
    parse_training_data(&content)
}

/// Parse training samples from a JSON array or JSON Lines string.
pub fn parse_training_data(content: &str) -> Result<Vec<TrainingSample>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    let mut samples = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sample = serde_json::from_str(line).map_err(|e| {
            HopliteError::invalid_argument(format!(
                "malformed training sample on line {}: {}",
                line_num + 1,
                e
            ))
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
