//! Length filter implementation.

use super::Filter;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A filter that keeps tokens whose character count lies in `[min, max]`.
///
/// Stopped tokens are dropped as well, so the output only carries tokens
/// that can become features.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    /// Create a new length filter with inclusive bounds.
    pub fn new(min: usize, max: usize) -> Self {
        LengthFilter { min, max }
    }

    /// Get the minimum length.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Get the maximum length.
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let (min, max) = (self.min, self.max);
        let kept: Vec<Token> = tokens
            .filter(|token| {
                let len = token.char_len();
                !token.is_stopped() && len >= min && len <= max
            })
            .collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
