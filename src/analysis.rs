//! Text analysis module for Hoplite.
//!
//! Turns raw documents into token streams. The default feature extractor of
//! the classifiers is a pipeline built from these pieces:
//!
//! ```text
//! Raw Text → WhitespaceTokenizer → LowercaseFilter → LengthFilter → Features
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
