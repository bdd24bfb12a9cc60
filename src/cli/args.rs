//! Command line argument parsing for the Hoplite CLI using clap.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::HopliteError;

/// Hoplite - train a text classifier and classify documents with it
#[derive(Parser, Debug, Clone)]
#[command(name = "hoplite")]
#[command(about = "Train a text classifier from labeled samples and classify documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Hoplite Contributors")]
#[command(long_about = None)]
pub struct HopliteArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HOPLITE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HopliteArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train from a sample file and classify texts
    Classify(ClassifyArgs),

    /// Train from a sample file and show model statistics
    Stats(StatsArgs),
}

/// Arguments for classifying texts
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Training samples (JSON array or JSON Lines of {"text", "category"})
    #[arg(value_name = "TRAINING_FILE")]
    pub training_file: PathBuf,

    /// Texts to classify
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,

    /// Classification method
    #[arg(short, long, default_value = "naive-bayes")]
    pub method: Method,

    /// Category reported when no confident decision can be made
    #[arg(short, long)]
    pub default: Option<String>,

    /// Naive Bayes threshold as CATEGORY=VALUE (repeatable)
    #[arg(long, value_name = "CATEGORY=VALUE")]
    pub threshold: Vec<CategoryValue>,

    /// Fisher minimum as CATEGORY=VALUE (repeatable)
    #[arg(long, value_name = "CATEGORY=VALUE")]
    pub minimum: Vec<CategoryValue>,

    /// Include per-category scores in the output
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for showing model statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Training samples (JSON array or JSON Lines of {"text", "category"})
    #[arg(value_name = "TRAINING_FILE")]
    pub training_file: PathBuf,
}

/// Classification methods available in the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Naive Bayes with thresholds
    NaiveBayes,
    /// Fisher's method with minimums
    Fisher,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// A `CATEGORY=VALUE` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
}

impl FromStr for CategoryValue {
    type Err = HopliteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, value) = s.rsplit_once('=').ok_or_else(|| {
            HopliteError::invalid_argument(format!("expected CATEGORY=VALUE, got '{s}'"))
        })?;
        if category.is_empty() {
            return Err(HopliteError::invalid_argument(format!(
                "missing category in '{s}'"
            )));
        }
        let value = value.trim().parse::<f64>().map_err(|e| {
            HopliteError::invalid_argument(format!("invalid value in '{s}': {e}"))
        })?;
        Ok(CategoryValue {
            category: category.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_value_parsing() {
        let parsed: CategoryValue = "bad=3.0".parse().unwrap();
        assert_eq!(parsed.category, "bad");
        assert_eq!(parsed.value, 3.0);

        let parsed: CategoryValue = "a=b=0.5".parse().unwrap();
        assert_eq!(parsed.category, "a=b");

        assert!("bad".parse::<CategoryValue>().is_err());
        assert!("=1".parse::<CategoryValue>().is_err());
        assert!("bad=high".parse::<CategoryValue>().is_err());
    }

    #[test]
    fn test_parse_classify_command() {
        let args = HopliteArgs::try_parse_from([
            "hoplite",
            "-vv",
            "classify",
            "samples.jsonl",
            "quick rabbit",
            "quick money",
            "--method",
            "fisher",
            "--minimum",
            "bad=0.8",
            "--default",
            "unknown",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        match args.command {
            Command::Classify(classify) => {
                assert_eq!(classify.texts.len(), 2);
                assert_eq!(classify.method, Method::Fisher);
                assert_eq!(classify.minimum[0].value, 0.8);
                assert_eq!(classify.default.as_deref(), Some("unknown"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_classify_requires_text() {
        assert!(HopliteArgs::try_parse_from(["hoplite", "classify", "samples.jsonl"]).is_err());
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            HopliteArgs::try_parse_from(["hoplite", "-q", "-vvv", "stats", "samples.json"]).unwrap();
        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Human);
    }
}
