//! # Hoplite
//!
//! A small, incrementally trainable text classification library for Rust.
//!
//! ## Features
//!
//! - Every `train` call updates the model immediately
//! - Naive Bayes classification with per-category thresholds
//! - Fisher's method classification with per-category minimums
//! - Pluggable feature extraction on top of a text analysis pipeline
//! - A command line tool for training from JSON samples

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod error;

pub mod prelude {
    pub use crate::classification::{
        Classifier, DocumentClassifier, FeatureExtractor, FisherClassifier, NaiveBayesClassifier,
    };
    pub use crate::error::{HopliteError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
