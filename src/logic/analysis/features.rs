//! Feature diagnostics: vectorizer stats, log-probabilities, top features

use serde::Serialize;

use super::report::{AnalysisReport, TfidfStats};
use super::{chart_rows, ChartRow};

/// Features listed per class
pub const TOP_FEATURES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogProbabilityRow {
    pub class: String,
    pub stat: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassFeatures {
    pub class: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturesView {
    pub vectorizer: Option<TfidfStats>,
    pub feature_counts: Vec<ChartRow>,
    pub log_probabilities: Vec<LogProbabilityRow>,
    pub top_features: Vec<ClassFeatures>,
}

pub fn build(report: &AnalysisReport) -> FeaturesView {
    let nb = report.naive_bayes_specific.clone().unwrap_or_default();

    let log_probabilities = nb
        .feature_log_probabilities
        .iter()
        .flat_map(|(class, stats)| {
            [("Mean", stats.mean), ("Std", stats.std)]
                .into_iter()
                .map(move |(stat, value)| LogProbabilityRow {
                    class: class.to_string(),
                    stat,
                    value,
                })
        })
        .collect();

    // Backend already ranks the features
    let top_features = report
        .top_features_per_class
        .iter()
        .map(|(class, features)| ClassFeatures {
            class: class.to_string(),
            features: features.iter().take(TOP_FEATURES).cloned().collect(),
        })
        .collect();

    FeaturesView {
        vectorizer: nb.tfidf_vectorizer_stats.clone(),
        feature_counts: chart_rows(&nb.feature_counts_per_class, |c| *c),
        log_probabilities,
        top_features,
    }
}
