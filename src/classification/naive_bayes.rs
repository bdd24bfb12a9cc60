//! Naive Bayes classification.

use std::sync::Arc;

use super::classifier::{Category, Classifier, DocumentClassifier};
use super::config::ClassifierConfig;
use super::feature::{FeatureExtractor, FeatureSet};
use crate::error::Result;

/// Scores a document as Pr(document | category) · Pr(category).
///
/// Features are assumed independent, so Pr(document | category) is the
/// product of the weighted feature probabilities. Decisions use the base
/// threshold policy of [`Classifier::select_category`].
///
/// # Examples
///
/// ```
/// use hoplite::classification::{DocumentClassifier, NaiveBayesClassifier};
///
/// let mut classifier = NaiveBayesClassifier::new();
/// classifier.train("buy pharmaceuticals now", "bad").unwrap();
/// classifier.train("the quick rabbit jumps fences", "good").unwrap();
///
/// assert_eq!(classifier.classify("quick rabbit", None).unwrap(), Some("good"));
/// ```
#[derive(Debug)]
pub struct NaiveBayesClassifier<C: Category> {
    classifier: Classifier<C>,
}

impl<C: Category> Default for NaiveBayesClassifier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> NaiveBayesClassifier<C> {
    /// Create an empty classifier using the default word extractor.
    pub fn new() -> Self {
        Self::from_classifier(Classifier::new())
    }

    /// Create an empty classifier with an injected feature extractor.
    pub fn with_extractor(extractor: Arc<dyn FeatureExtractor>) -> Self {
        Self::from_classifier(Classifier::with_extractor(extractor))
    }

    /// Create an empty classifier from a configuration.
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        Ok(Self::from_classifier(Classifier::with_config(config)?))
    }

    /// Score with Naive Bayes on top of an existing counting model.
    pub fn from_classifier(classifier: Classifier<C>) -> Self {
        NaiveBayesClassifier { classifier }
    }

    /// Give the counting model back.
    pub fn into_classifier(self) -> Classifier<C> {
        self.classifier
    }

    /// Pr(document | category): product of the weighted probabilities of
    /// every feature. An empty feature set yields 1.
    pub fn document_probability(&self, features: &FeatureSet, category: &C) -> f64 {
        let classifier = &self.classifier;
        features
            .iter()
            .map(|feature| {
                classifier.weighted_probability(feature, category, |f, c| {
                    classifier.feature_probability(f, c)
                })
            })
            .product()
    }

    /// Pr(category): share of training documents labeled `category`, or 0
    /// before any training.
    pub fn category_probability(&self, category: &C) -> f64 {
        let total = self.classifier.total_count();
        if total == 0.0 {
            return 0.0;
        }
        self.classifier.category_count(category) / total
    }

    /// Threshold multiplier of `category`.
    pub fn threshold(&self, category: &C) -> f64 {
        self.classifier.threshold(category)
    }

    /// Configure the threshold multiplier of `category`.
    pub fn set_threshold(&mut self, category: C, threshold: f64) {
        self.classifier.set_threshold(category, threshold);
    }
}

impl<C: Category> DocumentClassifier<C> for NaiveBayesClassifier<C> {
    fn classifier(&self) -> &Classifier<C> {
        &self.classifier
    }

    fn classifier_mut(&mut self) -> &mut Classifier<C> {
        &mut self.classifier
    }

    fn features_score(&self, features: &FeatureSet, category: &C) -> f64 {
        self.category_probability(category) * self.document_probability(features, category)
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}
