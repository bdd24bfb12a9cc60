//! Command implementations for the Hoplite CLI.

use log::{info, warn};

use crate::classification::{
    ClassifierConfig, DocumentClassifier, FisherClassifier, NaiveBayesClassifier,
    load_training_data,
};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: HopliteArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Classify(classify_args) => {
            let report = run_classify(classify_args, config)?;
            output_result("Classification results", &report, &args)
        }
        Command::Stats(stats_args) => {
            let report = run_stats(stats_args, config)?;
            output_result("Model statistics", &report, &args)
        }
    }
}

/// Load the classifier configuration named on the command line, if any.
pub fn load_config(args: &HopliteArgs) -> Result<ClassifierConfig> {
    match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ClassifierConfig::from_json_file(path)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

/// Build the classifier selected by `args`, with thresholds or minimums
/// applied.
fn build_classifier(
    args: &ClassifyArgs,
    config: ClassifierConfig,
) -> Result<Box<dyn DocumentClassifier<String>>> {
    match args.method {
        Method::NaiveBayes => {
            if !args.minimum.is_empty() {
                warn!("--minimum only applies to the fisher method; ignoring");
            }
            let mut classifier = NaiveBayesClassifier::with_config(config)?;
            for threshold in &args.threshold {
                classifier.set_threshold(threshold.category.clone(), threshold.value);
            }
            Ok(Box::new(classifier))
        }
        Method::Fisher => {
            if !args.threshold.is_empty() {
                warn!("--threshold only applies to the naive-bayes method; ignoring");
            }
            let mut classifier = FisherClassifier::with_config(config)?;
            for minimum in &args.minimum {
                classifier.set_minimum(minimum.category.clone(), minimum.value);
            }
            Ok(Box::new(classifier))
        }
    }
}

/// Train from the sample file and classify every text.
pub fn run_classify(args: &ClassifyArgs, config: ClassifierConfig) -> Result<ClassifyReport> {
    let mut classifier = build_classifier(args, config)?;

    info!("Training from: {}", args.training_file.display());
    let samples = load_training_data(&args.training_file)?;
    let training_samples = classifier.classifier_mut().train_samples(samples)?;
    info!(
        "Trained {} samples into {} categories",
        training_samples,
        classifier.classifier().categories().len()
    );

    let mut results = Vec::with_capacity(args.texts.len());
    for text in &args.texts {
        let category = classifier.classify(text, args.default.clone())?;
        let scores = if args.explain {
            Some(
                classifier
                    .scores(text)?
                    .into_iter()
                    .map(|(category, score)| CategoryScore { category, score })
                    .collect(),
            )
        } else {
            None
        };
        results.push(ClassificationResult {
            text: text.clone(),
            category,
            scores,
        });
    }

    Ok(ClassifyReport {
        method: args.method,
        training_samples,
        results,
    })
}

/// Train from the sample file and summarize the model.
pub fn run_stats(args: &StatsArgs, config: ClassifierConfig) -> Result<StatsReport> {
    let mut classifier = NaiveBayesClassifier::with_config(config)?;

    info!("Training from: {}", args.training_file.display());
    let samples = load_training_data(&args.training_file)?;
    let training_samples = classifier.classifier_mut().train_samples(samples)?;

    let model = classifier.classifier();
    let categories = model
        .categories()
        .iter()
        .map(|category| CategoryStats {
            category: category.clone(),
            documents: model.category_count(category) as u64,
        })
        .collect();

    Ok(StatsReport {
        training_samples,
        total_documents: model.total_count() as u64,
        vocabulary_size: model.vocabulary_size(),
        categories,
    })
}
