//! Lowercase filter implementation.
//!
//! Normalizes token casing so that features are case-insensitive.
//!
//! # Examples
//!
//! ```
//! use hoplite::analysis::token_filter::Filter;
//! use hoplite::analysis::token_filter::lowercase::LowercaseFilter;
//! use hoplite::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![
//!     Token::new("The", 0),
//!     Token::new("QUICK", 1),
//!     Token::new("Brown", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "the");
//! assert_eq!(result[1].text, "quick");
//! assert_eq!(result[2].text, "brown");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Stopped tokens pass through untouched. ASCII text takes the cheap
/// byte-wise path; everything else uses Unicode-aware lowercasing.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else if token.text.is_ascii() {
                    token.with_text(token.text.to_ascii_lowercase())
                } else {
                    token.with_text(token.text.to_lowercase())
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
