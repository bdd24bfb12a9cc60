//! Trainable document classification.
//!
//! Every call to `train` immediately updates the counting model; there is no
//! separate fitting pass. Two strategies score documents against it:
//!
//! - [`NaiveBayesClassifier`]: category prior times the product of weighted
//!   feature probabilities, with per-category thresholds guarding the
//!   decision.
//! - [`FisherClassifier`]: Fisher's method over normalized feature
//!   probabilities, with per-category minimums.
//!
//! # Architecture
//!
//! - [`FeatureExtractor`]: turns documents into features (injectable)
//! - [`Classifier`]: counting tables, basic and weighted probabilities
//! - [`DocumentClassifier`]: common interface of the strategies
//!
//! # Example
//!
//! ```
//! use hoplite::classification::{DocumentClassifier, NaiveBayesClassifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut classifier = NaiveBayesClassifier::new();
//! classifier.train("the quick rabbit jumps fences", "good".to_string())?;
//! classifier.train("buy pharmaceuticals now", "bad".to_string())?;
//!
//! let category = classifier.classify("buy now", Some("unknown".to_string()))?;
//! assert_eq!(category.as_deref(), Some("bad"));
//! # Ok(())
//! # }
//! ```

mod classifier;
mod config;
mod feature;
mod fisher;
mod naive_bayes;
mod sample;

pub use classifier::{Category, Classifier, DocumentClassifier};
pub use config::ClassifierConfig;
pub use feature::{AnalyzerFeatureExtractor, FeatureExtractor, FeatureSet, WordFeatureExtractor};
pub use fisher::{FisherClassifier, inv_chi2};
pub use naive_bayes::NaiveBayesClassifier;
pub use sample::{TrainingSample, load_training_data, parse_training_data};
