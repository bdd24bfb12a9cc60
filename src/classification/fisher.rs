//! Fisher's method classification.
//!
//! Each feature contributes how concentrated it is on a category relative to
//! all categories. The weighted concentrations are multiplied and the
//! product is turned into a goodness-of-fit probability with the inverse
//! chi-square function: a high value means the document looks
//! characteristic of the category, a low value that it looks like noise.

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use super::classifier::{Category, Classifier, DocumentClassifier};
use super::config::ClassifierConfig;
use super::feature::{FeatureExtractor, FeatureSet};
use crate::error::Result;

/// Upper-tail probability of the chi-square distribution.
///
/// The probability that a chi-square variable with `degrees_of_freedom`
/// (even) exceeds `chi`, computed with the series expansion
/// `e^-m · Σ m^i / i!` for `i < degrees_of_freedom / 2`, `m = chi / 2`.
/// Capped at 1.0 against rounding overshoot.
///
/// # Examples
///
/// ```
/// use hoplite::classification::inv_chi2;
///
/// assert_eq!(inv_chi2(0.0, 4), 1.0);
/// assert!((inv_chi2(2.0, 2) - (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn inv_chi2(chi: f64, degrees_of_freedom: usize) -> f64 {
    let m = chi / 2.0;
    let mut term = (-m).exp();
    let mut sum = term;
    for i in 1..degrees_of_freedom / 2 {
        term *= m / i as f64;
        sum += term;
    }
    sum.min(1.0)
}

/// Classifier combining feature probabilities with Fisher's method.
///
/// Replaces the threshold policy with per-category minimums: a category is
/// only chosen when its probability beats both its minimum and every
/// earlier candidate.
///
/// # Examples
///
/// ```
/// use hoplite::classification::{DocumentClassifier, FisherClassifier};
///
/// let mut classifier = FisherClassifier::new();
/// classifier.train("the quick rabbit jumps fences", "good").unwrap();
/// classifier.train("make quick money at the online casino", "bad").unwrap();
///
/// assert_eq!(classifier.classify("rabbit fences", None).unwrap(), Some("good"));
///
/// classifier.set_minimum("good", 0.99);
/// classifier.set_minimum("bad", 0.5);
/// assert_eq!(classifier.classify("rabbit fences", Some("unknown")).unwrap(), Some("unknown"));
/// ```
#[derive(Debug)]
pub struct FisherClassifier<C: Category> {
    classifier: Classifier<C>,
    minimums: AHashMap<C, f64>,
}

impl<C: Category> Default for FisherClassifier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> FisherClassifier<C> {
    /// Minimum applied to categories that were never configured.
    pub const DEFAULT_MINIMUM: f64 = 0.0;

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

    /// Score with Fisher's method on top of an existing counting model.
    pub fn from_classifier(classifier: Classifier<C>) -> Self {
        FisherClassifier {
            classifier,
            minimums: AHashMap::new(),
        }
    }

    /// Give the counting model back. Minimums are dropped.
    pub fn into_classifier(self) -> Classifier<C> {
        self.classifier
    }

    /// How concentrated `feature` is on `category`: its feature probability
    /// divided by the sum of its feature probabilities over all categories.
    ///
    /// Independent of how many documents each category has.
    pub fn normalized_feature_probability(&self, feature: &str, category: &C) -> f64 {
        let probability = self.classifier.feature_probability(feature, category);
        if probability == 0.0 {
            return 0.0;
        }

        let sum: f64 = self
            .classifier
            .categories()
            .iter()
            .map(|c| self.classifier.feature_probability(feature, c))
            .sum();
        probability / sum
    }

    /// Fisher probability of already-extracted features.
    pub fn features_probability(&self, features: &FeatureSet, category: &C) -> f64 {
        let classifier = &self.classifier;
        let product: f64 = features
            .iter()
            .map(|feature| {
                classifier.weighted_probability(feature, category, |f, c| {
                    self.normalized_feature_probability(f, c)
                })
            })
            .product();

        // Only reachable with an assumed probability of 0; ln(0) would
        // turn the series into NaN.
        if product <= 0.0 {
            return 0.0;
        }

        let score = -2.0 * product.ln();
        inv_chi2(score, 2 * features.len())
    }

    /// Fisher probability of `item` for `category`, in `[0, 1]`.
    pub fn fisher_probability(&self, item: &str, category: &C) -> Result<f64> {
        let features = self.classifier.extract(item)?;
        Ok(self.features_probability(&features, category))
    }

    /// Minimum probability `category` must exceed to be chosen.
    pub fn minimum(&self, category: &C) -> f64 {
        self.minimums
            .get(category)
            .copied()
            .unwrap_or(Self::DEFAULT_MINIMUM)
    }

    /// Configure the minimum of `category`.
    pub fn set_minimum(&mut self, category: C, minimum: f64) {
        self.minimums.insert(category, minimum);
    }

    /// Configured minimums. Categories absent from the map use
    /// [`DEFAULT_MINIMUM`](Self::DEFAULT_MINIMUM).
    pub fn minimums(&self) -> &AHashMap<C, f64> {
        &self.minimums
    }

    /// Mutable access to the configured minimums.
    pub fn minimums_mut(&mut self) -> &mut AHashMap<C, f64> {
        &mut self.minimums
    }
}

impl<C: Category> DocumentClassifier<C> for FisherClassifier<C> {
    fn classifier(&self) -> &Classifier<C> {
        &self.classifier
    }

    fn classifier_mut(&mut self) -> &mut Classifier<C> {
        &mut self.classifier
    }

    fn features_score(&self, features: &FeatureSet, category: &C) -> f64 {
        self.features_probability(features, category)
    }

    fn name(&self) -> &str {
        "fisher"
    }

    fn classify(&self, item: &str, default: Option<C>) -> Result<Option<C>> {
        let mut best = default;
        let mut max = 0.0;
        for (category, probability) in self.scores(item)? {
            if probability > self.minimum(&category) && probability > max {
                max = probability;
                best = Some(category);
            }
        }
        debug!("fisher picked {:?} ({})", best, max);
        Ok(best)
    }
}
