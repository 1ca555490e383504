//! Naive Bayes diagnostics: priors, confidence, misclassification, separability

use serde::Serialize;

use super::report::AnalysisReport;
use super::{chart_rows, ChartRow};

/// Misclassification patterns shown
pub const TOP_MISCLASSIFICATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaiveBayesView {
    pub class_priors: Vec<ChartRow>,
    pub confidence_distribution: Vec<ChartRow>,
    pub misclassifications: Vec<ChartRow>,
    pub zero_probability_features: Vec<ChartRow>,
    pub kl_divergence: Vec<ChartRow>,
}

pub fn build(report: &AnalysisReport) -> NaiveBayesView {
    let nb = report.naive_bayes_specific.clone().unwrap_or_default();

    let mut misclassifications: Vec<ChartRow> = nb
        .misclassification_patterns
        .iter()
        .map(|(pattern, count)| ChartRow {
            label: pattern.replace('_', " "),
            value: *count as f64,
        })
        .collect();
    misclassifications.sort_by(|a, b| b.value.total_cmp(&a.value));
    misclassifications.truncate(TOP_MISCLASSIFICATIONS);

    let kl_divergence = nb
        .class_separability_kl_divergence
        .iter()
        .map(|(pair, value)| ChartRow {
            label: pair.replace("_vs_", " vs "),
            value: *value,
        })
        .collect();

    NaiveBayesView {
        class_priors: chart_rows(&nb.class_priors, |p| *p),
        confidence_distribution: chart_rows(&nb.prediction_confidence_distribution, |c| *c as f64),
        misclassifications,
        zero_probability_features: chart_rows(&nb.zero_probability_features, |z| z.percentage),
        kl_divergence,
    }
}
