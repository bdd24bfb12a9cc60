//! Error types for the Hoplite library.
//!
//! All errors are represented by the [`HopliteError`] enum. Most of the
//! classification surface is infallible arithmetic over the counting tables;
//! errors come from feature extraction, configuration, and loading training
//! data from disk.
//!
//! # Examples
//!
//! ```
//! use hoplite::error::{HopliteError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HopliteError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Hoplite operations.
#[derive(Error, Debug)]
pub enum HopliteError {
    /// I/O errors (reading training data or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, filtering, feature extraction)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid classifier configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HopliteError.
pub type Result<T> = std::result::Result<T, HopliteError>;

impl HopliteError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        HopliteError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HopliteError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HopliteError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HopliteError::Other(msg.into())
    }
}
