//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{HopliteArgs, Method, OutputFormat};
use crate::error::Result;

/// Score of one category for one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

/// Classification outcome for one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub text: String,
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<CategoryScore>>,
}

/// Result structure for the classify command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyReport {
    pub method: Method,
    pub training_samples: usize,
    pub results: Vec<ClassificationResult>,
}

/// Document count of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub documents: u64,
}

/// Result structure for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub training_samples: usize,
    pub total_documents: u64,
    pub vocabulary_size: usize,
    pub categories: Vec<CategoryStats>,
}

/// Types that know how to print themselves for humans.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for ClassifyReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for result in &self.results {
            let category = result.category.as_deref().unwrap_or("(none)");
            writeln!(out, "{category}\t{}", result.text)?;

            if let Some(scores) = &result.scores {
                for score in scores {
                    writeln!(out, "    {:<20} {:.6}", score.category, score.score)?;
                }
            }
        }
        Ok(())
    }
}

impl HumanOutput for StatsReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Training samples: {}", self.training_samples)?;
        writeln!(out, "Documents:        {}", self.total_documents)?;
        writeln!(out, "Vocabulary size:  {}", self.vocabulary_size)?;
        writeln!(out, "Categories:")?;
        for stats in &self.categories {
            writeln!(out, "    {:<20} {}", stats.category, stats.documents)?;
        }
        Ok(())
    }
}

/// Output a result to stdout in the requested format.
pub fn output_result<T>(message: &str, result: &T, args: &HopliteArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_result(&mut handle, message, result, args)
}

/// Write a result to `out` in the requested format.
pub fn write_result<T, W>(out: &mut W, message: &str, result: &T, args: &HopliteArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
    W: Write,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn report() -> ClassifyReport {
        ClassifyReport {
            method: Method::NaiveBayes,
            training_samples: 5,
            results: vec![ClassificationResult {
                text: "quick rabbit".to_string(),
                category: Some("good".to_string()),
                scores: Some(vec![CategoryScore {
                    category: "good".to_string(),
                    score: 0.15625,
                }]),
            }],
        }
    }

    #[test]
    fn test_human_output() {
        let args = HopliteArgs::parse_from(["hoplite", "stats", "x.json"]);
        let mut out = Vec::new();
        write_result(&mut out, "Classified", &report(), &args).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("good\tquick rabbit\n"));
        assert!(text.contains("0.156250"));
        assert!(!text.contains("Classified"));
    }

    #[test]
    fn test_json_output() {
        let args = HopliteArgs::parse_from(["hoplite", "-f", "json", "stats", "x.json"]);
        let mut out = Vec::new();
        write_result(&mut out, "Classified", &report(), &args).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["method"], "naive-bayes");
        assert_eq!(value["results"][0]["category"], "good");
    }

    #[test]
    fn test_stats_human_output() {
        let args = HopliteArgs::parse_from(["hoplite", "-vv", "stats", "x.json"]);
        let stats = StatsReport {
            training_samples: 2,
            total_documents: 2,
            vocabulary_size: 7,
            categories: vec![CategoryStats {
                category: "bad".to_string(),
                documents: 2,
            }],
        };
        let mut out = Vec::new();
        write_result(&mut out, "Model statistics", &stats, &args).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Model statistics\n"));
        assert!(text.contains("Vocabulary size:  7"));
    }
}
