//! Feature extraction for the classifiers.
//!
//! A [`FeatureExtractor`] maps a raw document to the set of features the
//! counting tables are keyed on. Extractors are injected into a
//! [`Classifier`](super::classifier::Classifier) at construction; when none
//! is supplied the [`WordFeatureExtractor`] is used.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LengthFilter, LowercaseFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// The distinct features of one document.
///
/// Ordered so that products over features are evaluated in the same order on
/// every call.
pub type FeatureSet = BTreeSet<String>;

/// Maps a document to its set of features.
///
/// Implementations must be deterministic and free of side effects.
pub trait FeatureExtractor: Send + Sync {
    /// Extract the distinct features of `document`.
    fn extract(&self, document: &str) -> Result<FeatureSet>;

    /// Get the name of this extractor for debugging and logging.
    fn name(&self) -> &str;
}

/// The default extractor: whitespace-separated, lowercased words of 3 to 19
/// characters.
#[derive(Debug, Clone)]
pub struct WordFeatureExtractor {
    analyzer: PipelineAnalyzer,
    min_length: usize,
    max_length: usize,
}

impl WordFeatureExtractor {
    /// Shortest word kept by default.
    pub const DEFAULT_MIN_LENGTH: usize = 3;
    /// Longest word kept by default.
    pub const DEFAULT_MAX_LENGTH: usize = 19;

    /// Create an extractor with the default length bounds.
    pub fn new() -> Self {
        Self::with_bounds(Self::DEFAULT_MIN_LENGTH, Self::DEFAULT_MAX_LENGTH)
    }

    /// Create an extractor keeping words whose length is in `[min, max]`.
    pub fn with_bounds(min_length: usize, max_length: usize) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(LengthFilter::new(min_length, max_length)))
            .with_name("words");

        WordFeatureExtractor {
            analyzer,
            min_length,
            max_length,
        }
    }

    /// Get the inclusive length bounds.
    pub fn bounds(&self) -> (usize, usize) {
        (self.min_length, self.max_length)
    }
}

impl Default for WordFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for WordFeatureExtractor {
    fn extract(&self, document: &str) -> Result<FeatureSet> {
        Ok(self.analyzer.analyze(document)?.map(|token| token.text).collect())
    }

    fn name(&self) -> &str {
        "words"
    }
}

/// Adapts any [`Analyzer`] into a feature extractor.
///
/// Stopped and empty tokens are skipped; the remaining token texts become
/// the features.
pub struct AnalyzerFeatureExtractor {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for AnalyzerFeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerFeatureExtractor")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl AnalyzerFeatureExtractor {
    /// Wrap an analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        AnalyzerFeatureExtractor { analyzer }
    }
}

impl FeatureExtractor for AnalyzerFeatureExtractor {
    fn extract(&self, document: &str) -> Result<FeatureSet> {
        Ok(self
            .analyzer
            .analyze(document)?
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .map(|token| token.text)
            .collect())
    }

    fn name(&self) -> &str {
        self.analyzer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{Token, TokenStream};

    fn features(words: &[&str]) -> FeatureSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_word_extractor_lowercases_and_deduplicates() {
        let extractor = WordFeatureExtractor::new();
        let result = extractor.extract("The quick brown fox jumps over THE lazy dog").unwrap();

        assert_eq!(
            result,
            features(&["brown", "dog", "fox", "jumps", "lazy", "over", "quick", "the"])
        );
    }

    #[test]
    fn test_word_extractor_length_bounds() {
        let extractor = WordFeatureExtractor::new();
        let long = "x".repeat(20);
        let edge = "y".repeat(19);
        let doc = format!("make money at a casino {long} {edge}");

        let result = extractor.extract(&doc).unwrap();

        assert!(result.contains("make"));
        assert!(result.contains(&edge));
        assert!(!result.contains("at"));
        assert!(!result.contains("a"));
        assert!(!result.contains(&long));
    }

    #[test]
    fn test_word_extractor_empty_document() {
        let extractor = WordFeatureExtractor::new();
        assert!(extractor.extract("").unwrap().is_empty());
        assert!(extractor.extract("a an to").unwrap().is_empty());
    }

    #[test]
    fn test_custom_bounds() {
        let extractor = WordFeatureExtractor::with_bounds(1, 2);
        assert_eq!(extractor.bounds(), (1, 2));
        assert_eq!(extractor.extract("a an the").unwrap(), features(&["a", "an"]));
    }

    struct StoppingAnalyzer;

    impl Analyzer for StoppingAnalyzer {
        fn analyze(&self, text: &str) -> Result<TokenStream> {
            let tokens: Vec<Token> = text
                .split(',')
                .enumerate()
                .map(|(i, part)| {
                    let token = Token::new(part.trim(), i);
                    if part.trim() == "stop" { token.stop() } else { token }
                })
                .collect();
            Ok(Box::new(tokens.into_iter()))
        }

        fn name(&self) -> &'static str {
            "comma"
        }
    }

    #[test]
    fn test_analyzer_extractor_skips_stopped_and_empty() {
        let extractor = AnalyzerFeatureExtractor::new(Arc::new(StoppingAnalyzer));
        let result = extractor.extract("red, stop, , Blue, red").unwrap();

        assert_eq!(result, features(&["Blue", "red"]));
        assert_eq!(extractor.name(), "comma");
    }
}
