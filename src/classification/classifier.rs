//! Counting model and category-decision policy shared by every classifier.
//!
//! [`Classifier`] owns the counting tables that training mutates and derives
//! the basic and weighted feature probabilities from them. The scoring
//! strategies ([`NaiveBayesClassifier`](super::naive_bayes::NaiveBayesClassifier)
//! and [`FisherClassifier`](super::fisher::FisherClassifier)) wrap a
//! `Classifier` and implement [`DocumentClassifier`].
//!
//! A `Classifier` has no internal synchronization. Training takes
//! `&mut self`; concurrent readers are fine, but sharing an instance between
//! a trainer and readers needs an external lock.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, trace};

use super::config::ClassifierConfig;
use super::feature::{FeatureExtractor, FeatureSet, WordFeatureExtractor};
use super::sample::TrainingSample;
use crate::error::Result;

/// A label documents can be classified into.
///
/// Implemented for every type with the required bounds, e.g. `String`,
/// `&'static str` or a fieldless enum deriving `Clone, PartialEq, Eq, Hash,
/// Debug`.
pub trait Category: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> Category for T where T: Clone + Eq + Hash + Debug + Send + Sync {}

/// The incremental counting model.
pub struct Classifier<C: Category> {
    extractor: Arc<dyn FeatureExtractor>,
    config: ClassifierConfig,
    /// feature -> category -> number of training documents containing it.
    feature_counts: AHashMap<String, AHashMap<C, u64>>,
    /// category -> number of training documents.
    category_counts: AHashMap<C, u64>,
    /// Known categories in the order they were first trained.
    categories: Vec<C>,
    thresholds: AHashMap<C, f64>,
}

impl<C: Category> Debug for Classifier<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("extractor", &self.extractor.name())
            .field("config", &self.config)
            .field("categories", &self.categories)
            .field("vocabulary_size", &self.feature_counts.len())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl<C: Category> Default for Classifier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> Classifier<C> {
    /// Threshold applied to categories that were never configured.
    pub const DEFAULT_THRESHOLD: f64 = 0.0;

    /// Create an empty classifier using the default word extractor.
    pub fn new() -> Self {
        Self::build(Arc::new(WordFeatureExtractor::new()), ClassifierConfig::default())
    }

    /// Create an empty classifier with an injected feature extractor.
    pub fn with_extractor(extractor: Arc<dyn FeatureExtractor>) -> Self {
        Self::build(extractor, ClassifierConfig::default())
    }

    /// Create an empty classifier from a configuration.
    ///
    /// The default word extractor is built with the configured length bounds.
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let extractor =
            WordFeatureExtractor::with_bounds(config.min_word_length, config.max_word_length);
        Ok(Self::build(Arc::new(extractor), config))
    }

    /// Create an empty classifier with both an extractor and a configuration.
    ///
    /// The word-length bounds of `config` are ignored; `extractor` decides
    /// what a feature is.
    pub fn with_extractor_and_config(
        extractor: Arc<dyn FeatureExtractor>,
        config: ClassifierConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(extractor, config))
    }

    fn build(extractor: Arc<dyn FeatureExtractor>, config: ClassifierConfig) -> Self {
        Classifier {
            extractor,
            config,
            feature_counts: AHashMap::new(),
            category_counts: AHashMap::new(),
            categories: Vec::new(),
            thresholds: AHashMap::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Get the feature extractor.
    pub fn extractor(&self) -> &Arc<dyn FeatureExtractor> {
        &self.extractor
    }

    /// Extract the features of `item` with the injected extractor.
    pub fn extract(&self, item: &str) -> Result<FeatureSet> {
        self.extractor.extract(item)
    }

    /// Train the model with one labeled document.
    ///
    /// Every distinct feature of `item` gets its count for `category` bumped
    /// by one, as does the document count of `category`. Training the same
    /// document twice counts it twice.
    pub fn train(&mut self, item: &str, category: C) -> Result<()> {
        let features = self.extract(item)?;
        trace!("training {:?} with {} features", category, features.len());

        for feature in features {
            *self
                .feature_counts
                .entry(feature)
                .or_default()
                .entry(category.clone())
                .or_insert(0) += 1;
        }

        match self.category_counts.get_mut(&category) {
            Some(count) => *count += 1,
            None => {
                debug!("new category {:?}", category);
                self.categories.push(category.clone());
                self.category_counts.insert(category, 1);
            }
        }

        Ok(())
    }

    /// Train the model with a batch of samples, in order.
    ///
    /// Returns the number of samples trained.
    pub fn train_samples<I>(&mut self, samples: I) -> Result<usize>
    where
        I: IntoIterator<Item = TrainingSample<C>>,
    {
        let mut trained = 0;
        for sample in samples {
            self.train(&sample.text, sample.category)?;
            trained += 1;
        }
        debug!(
            "trained {} samples; {} categories, {} features",
            trained,
            self.categories.len(),
            self.feature_counts.len()
        );
        Ok(trained)
    }

    /// Number of training documents of `category` containing `feature`.
    ///
    /// Zero when either has never been seen.
    pub fn feature_count(&self, feature: &str, category: &C) -> f64 {
        self.feature_counts
            .get(feature)
            .and_then(|counts| counts.get(category))
            .copied()
            .unwrap_or(0) as f64
    }

    /// Number of training documents, over all categories, containing
    /// `feature`.
    pub fn feature_total(&self, feature: &str) -> f64 {
        self.feature_counts
            .get(feature)
            .map_or(0, |counts| counts.values().sum::<u64>()) as f64
    }

    /// Number of training documents of `category`.
    pub fn category_count(&self, category: &C) -> f64 {
        self.category_counts.get(category).copied().unwrap_or(0) as f64
    }

    /// Number of training documents.
    pub fn total_count(&self) -> f64 {
        self.category_counts.values().sum::<u64>() as f64
    }

    /// Known categories, in the order they were first trained.
    pub fn categories(&self) -> &[C] {
        &self.categories
    }

    /// Number of distinct features seen in training.
    pub fn vocabulary_size(&self) -> usize {
        self.feature_counts.len()
    }

    /// Pr(feature | category): the share of `category` documents containing
    /// `feature`, or 0 for a category without documents.
    pub fn feature_probability(&self, feature: &str, category: &C) -> f64 {
        let documents = self.category_count(category);
        if documents == 0.0 {
            return 0.0;
        }
        self.feature_count(feature, category) / documents
    }

    /// Weighted probability using the configured weight and assumed
    /// probability.
    ///
    /// See [`weighted_probability_with`](Self::weighted_probability_with).
    pub fn weighted_probability<F>(&self, feature: &str, category: &C, basic: F) -> f64
    where
        F: Fn(&str, &C) -> f64,
    {
        self.weighted_probability_with(
            feature,
            category,
            self.config.weight,
            self.config.assumed_probability,
            basic,
        )
    }

    /// Blend `assumed_probability` with the basic probability computed by
    /// `basic`, weighting the latter by how often the feature was observed:
    ///
    /// ```text
    /// (weight · assumed + total · basic) / (weight + total)
    /// ```
    ///
    /// where `total` is [`feature_total`](Self::feature_total). An unseen
    /// feature yields exactly `assumed_probability`.
    pub fn weighted_probability_with<F>(
        &self,
        feature: &str,
        category: &C,
        weight: f64,
        assumed_probability: f64,
        basic: F,
    ) -> f64
    where
        F: Fn(&str, &C) -> f64,
    {
        let total = self.feature_total(feature);
        if total == 0.0 {
            return assumed_probability;
        }
        let basic = basic(feature, category);
        (weight * assumed_probability + total * basic) / (weight + total)
    }

    /// Threshold multiplier of `category`, 0 unless configured.
    pub fn threshold(&self, category: &C) -> f64 {
        self.thresholds
            .get(category)
            .copied()
            .unwrap_or(Self::DEFAULT_THRESHOLD)
    }

    /// Configure the threshold multiplier of `category`.
    pub fn set_threshold(&mut self, category: C, threshold: f64) {
        self.thresholds.insert(category, threshold);
    }

    /// Configured thresholds. Categories absent from the map use
    /// [`DEFAULT_THRESHOLD`](Self::DEFAULT_THRESHOLD).
    pub fn thresholds(&self) -> &AHashMap<C, f64> {
        &self.thresholds
    }

    /// Mutable access to the configured thresholds.
    pub fn thresholds_mut(&mut self) -> &mut AHashMap<C, f64> {
        &mut self.thresholds
    }

    /// Pick a category from per-category scores.
    ///
    /// The winner is the first category whose score strictly exceeds every
    /// earlier one, starting from 0, so a category scoring 0 never wins. If
    /// any other category's score multiplied by the winner's threshold
    /// exceeds the winner's score, the decision is not confident enough and
    /// `default` is returned. Without any positive score the result is
    /// `None`.
    pub fn select_category(&self, scores: &[(C, f64)], default: Option<C>) -> Option<C> {
        let mut best: Option<&(C, f64)> = None;
        let mut max = 0.0;
        for entry in scores {
            if entry.1 > max {
                max = entry.1;
                best = Some(entry);
            }
        }

        let (best_category, best_score) = best?;
        let threshold = self.threshold(best_category);
        for (category, score) in scores {
            if category == best_category {
                continue;
            }
            if score * threshold > *best_score {
                debug!(
                    "{:?} ({}) too close to {:?} ({}) under threshold {}; using default",
                    category, score, best_category, best_score, threshold
                );
                return default;
            }
        }

        Some(best_category.clone())
    }
}

/// A classification strategy over the shared counting model.
pub trait DocumentClassifier<C: Category>: Send + Sync {
    /// The underlying counting model.
    fn classifier(&self) -> &Classifier<C>;

    /// Mutable access to the underlying counting model.
    fn classifier_mut(&mut self) -> &mut Classifier<C>;

    /// Score already-extracted features against `category`.
    fn features_score(&self, features: &FeatureSet, category: &C) -> f64;

    /// Get the name of this strategy for debugging and logging.
    fn name(&self) -> &str;

    /// Train the model with one labeled document.
    fn train(&mut self, item: &str, category: C) -> Result<()> {
        self.classifier_mut().train(item, category)
    }

    /// Score `item` against `category`.
    fn document_score(&self, item: &str, category: &C) -> Result<f64> {
        let features = self.classifier().extract(item)?;
        Ok(self.features_score(&features, category))
    }

    /// Score `item` against every known category, in category order.
    fn scores(&self, item: &str) -> Result<Vec<(C, f64)>> {
        let features = self.classifier().extract(item)?;
        Ok(self
            .classifier()
            .categories()
            .iter()
            .map(|category| {
                let score = self.features_score(&features, category);
                trace!("{} score for {:?}: {}", self.name(), category, score);
                (category.clone(), score)
            })
            .collect())
    }

    /// Classify `item`, falling back to `default` when the decision policy
    /// is not confident.
    fn classify(&self, item: &str, default: Option<C>) -> Result<Option<C>> {
        let scores = self.scores(item)?;
        Ok(self.classifier().select_category(&scores, default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> Classifier<&'static str> {
        let mut classifier = Classifier::new();
        classifier
            .train("the quick brown fox jumps over the lazy dog", "good")
            .unwrap();
        classifier
            .train("make quick money in the online casino", "bad")
            .unwrap();
        classifier
    }

    #[test]
    fn test_feature_count() {
        let classifier = trained();

        assert_eq!(classifier.feature_count("quick", &"good"), 1.0);
        assert_eq!(classifier.feature_count("quick", &"bad"), 1.0);
        assert_eq!(classifier.feature_count("dog", &"good"), 1.0);
        assert_eq!(classifier.feature_count("dog", &"bad"), 0.0);
        assert_eq!(classifier.feature_count("dog", &"ugly"), 0.0);
        assert_eq!(classifier.feature_count("in", &"bad"), 0.0);
    }

    #[test]
    fn test_repeated_training_accumulates() {
        let mut classifier = trained();
        classifier
            .train("the quick brown fox jumps over the lazy dog", "good")
            .unwrap();

        assert_eq!(classifier.feature_count("quick", &"good"), 2.0);
        assert_eq!(classifier.category_count(&"good"), 2.0);
        assert_eq!(classifier.total_count(), 3.0);
    }

    #[test]
    fn test_duplicate_words_count_once_per_document() {
        let mut classifier = Classifier::new();
        classifier.train("the the the", "good").unwrap();

        assert_eq!(classifier.feature_count("the", &"good"), 1.0);
    }

    #[test]
    fn test_categories_in_training_order() {
        let mut classifier = trained();
        classifier.train("another good one", "good").unwrap();
        classifier.train("nothing to see", "neutral").unwrap();

        assert_eq!(classifier.categories(), &["good", "bad", "neutral"]);
        assert_eq!(classifier.total_count(), 4.0);
    }

    #[test]
    fn test_empty_document_still_counts_category() {
        let mut classifier = Classifier::new();
        classifier.train("", "empty").unwrap();

        assert_eq!(classifier.category_count(&"empty"), 1.0);
        assert_eq!(classifier.vocabulary_size(), 0);
    }

    #[test]
    fn test_feature_probability() {
        let classifier = trained();

        assert_eq!(classifier.feature_probability("quick", &"good"), 1.0);
        assert_eq!(classifier.feature_probability("money", &"good"), 0.0);
        assert_eq!(classifier.feature_probability("quick", &"unknown"), 0.0);
    }

    #[test]
    fn test_weighted_probability_unseen_feature_is_assumed() {
        let classifier = trained();
        let p = classifier.weighted_probability("chocolate", &"good", |f, c| {
            classifier.feature_probability(f, c)
        });
        assert_eq!(p, 0.5);

        let p = classifier.weighted_probability_with("chocolate", &"good", 3.0, 0.2, |_, _| 1.0);
        assert_eq!(p, 0.2);
    }

    #[test]
    fn test_weighted_probability_blends() {
        let classifier = trained();
        // money: total 1, basic 0 for good -> (0.5 + 0) / 2
        let p = classifier.weighted_probability("money", &"good", |f, c| {
            classifier.feature_probability(f, c)
        });
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_probability_converges_to_basic() {
        let mut classifier = Classifier::new();
        for _ in 0..10_000 {
            classifier.train("spam spam", "bad").unwrap();
        }
        let p = classifier.weighted_probability("spam", &"bad", |_, _| 0.9);
        assert!((p - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_weighted_probability_zero_weight_unseen() {
        let classifier: Classifier<&str> = Classifier::new();
        let p = classifier.weighted_probability_with("anything", &"x", 0.0, 0.3, |_, _| 0.0);
        assert_eq!(p, 0.3);
    }

    #[test]
    fn test_thresholds_default_and_set() {
        let mut classifier = trained();
        assert_eq!(classifier.threshold(&"bad"), 0.0);

        classifier.set_threshold("bad", 3.0);
        assert_eq!(classifier.threshold(&"bad"), 3.0);
        assert_eq!(classifier.threshold(&"good"), 0.0);

        classifier.thresholds_mut().insert("good", 1.5);
        assert_eq!(classifier.thresholds().len(), 2);
    }

    #[test]
    fn test_select_category_first_maximum_wins() {
        let classifier = trained();
        let scores = vec![("good", 0.4), ("bad", 0.4)];
        assert_eq!(classifier.select_category(&scores, Some("unknown")), Some("good"));
    }

    #[test]
    fn test_select_category_threshold_forces_default() {
        let mut classifier = trained();
        let scores = vec![("good", 0.5), ("bad", 0.25)];

        assert_eq!(classifier.select_category(&scores, Some("unknown")), Some("good"));

        classifier.set_threshold("good", 2.0);
        // 0.25 * 2.0 == 0.5 is not strictly greater
        assert_eq!(classifier.select_category(&scores, Some("unknown")), Some("good"));

        classifier.set_threshold("good", 2.5);
        assert_eq!(classifier.select_category(&scores, Some("unknown")), Some("unknown"));
        assert_eq!(classifier.select_category(&scores, None), None);
    }

    #[test]
    fn test_select_category_without_positive_score() {
        let classifier = trained();
        let scores = vec![("good", 0.0), ("bad", 0.0)];
        assert_eq!(classifier.select_category(&scores, Some("unknown")), None);
        assert_eq!(classifier.select_category(&[], Some("unknown")), None);
    }

    #[test]
    fn test_train_samples() {
        let mut classifier = Classifier::new();
        let trained = classifier
            .train_samples(vec![
                TrainingSample::new("buy pharmaceuticals now", "bad"),
                TrainingSample::new("nobody owns the water", "good"),
            ])
            .unwrap();

        assert_eq!(trained, 2);
        assert_eq!(classifier.categories(), &["bad", "good"]);
    }

    #[test]
    fn test_with_config_uses_word_bounds() {
        let config = ClassifierConfig::default().with_word_lengths(2, 4);
        let mut classifier = Classifier::with_config(config).unwrap();
        classifier.train("at the casino", "bad").unwrap();

        assert_eq!(classifier.feature_count("at", &"bad"), 1.0);
        assert_eq!(classifier.feature_count("casino", &"bad"), 0.0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = ClassifierConfig::default().with_weight(-2.0);
        assert!(Classifier::<String>::with_config(config).is_err());
    }
}
