//! Analysis report as returned by `/api/analyze/`
//!
//! Purely display data computed by the backend. Every section is optional
//! so that older or partial reports still decode; views skip what is
//! missing. A section that does not match its shape decodes as missing
//! instead of failing the whole report.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::logic::client::OrderedMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    #[serde(deserialize_with = "lenient")]
    pub model_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub model_version: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub total_samples: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub classes: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub class_distribution: OrderedMap<u64>,
    #[serde(deserialize_with = "lenient")]
    pub performance: Option<Performance>,
    #[serde(deserialize_with = "lenient")]
    pub model_health: Option<ModelHealth>,
    #[serde(deserialize_with = "lenient")]
    pub model_parameters: Option<ModelParameters>,
    #[serde(deserialize_with = "lenient")]
    pub naive_bayes_specific: Option<NaiveBayesDiagnostics>,
    #[serde(deserialize_with = "lenient")]
    pub class_overlap: Option<ClassOverlap>,
    #[serde(deserialize_with = "lenient")]
    pub learning_curve: Vec<LearningCurvePoint>,
    #[serde(deserialize_with = "lenient")]
    pub per_class_metrics: OrderedMap<ClassMetrics>,
    #[serde(deserialize_with = "lenient")]
    pub confusion_matrix: Option<ConfusionMatrix>,
    #[serde(deserialize_with = "lenient")]
    pub top_features_per_class: OrderedMap<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    pub train_accuracy: f64,
    pub cv_mean_accuracy: f64,
    pub cv_std_accuracy: f64,
    pub cv_scores: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelHealth {
    pub overfitting_status: String,
    pub overfitting_score: f64,
    pub underfitting_status: String,
    pub bias: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    pub n_features: u64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassOverlap {
    pub avg_confidence: f64,
    pub avg_confidence_gap: f64,
    pub low_confidence_samples: u64,
    pub high_overlap_samples: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningCurvePoint {
    pub complexity: f64,
    pub training: f64,
    pub validation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfusionMatrix {
    pub cross_validation: Vec<Vec<u64>>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesDiagnostics {
    #[serde(deserialize_with = "lenient")]
    pub conditional_independence: Option<ConditionalIndependence>,
    #[serde(deserialize_with = "lenient")]
    pub class_overlap: Option<ClassOverlap>,
    #[serde(deserialize_with = "lenient")]
    pub class_priors: OrderedMap<f64>,
    #[serde(deserialize_with = "lenient")]
    pub prediction_confidence_distribution: OrderedMap<u64>,
    #[serde(deserialize_with = "lenient")]
    pub misclassification_patterns: OrderedMap<u64>,
    #[serde(deserialize_with = "lenient")]
    pub zero_probability_features: OrderedMap<ZeroProbabilityFeatures>,
    #[serde(deserialize_with = "lenient")]
    pub class_separability_kl_divergence: OrderedMap<f64>,
    #[serde(deserialize_with = "lenient")]
    pub tfidf_vectorizer_stats: Option<TfidfStats>,
    #[serde(deserialize_with = "lenient")]
    pub feature_log_probabilities: OrderedMap<LogProbabilityStats>,
    #[serde(deserialize_with = "lenient")]
    pub feature_counts_per_class: OrderedMap<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalIndependence {
    pub status: String,
    pub violation_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeroProbabilityFeatures {
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfStats {
    pub vocabulary_size: u64,
    pub avg_document_length: f64,
    pub sparsity: f64,
    pub max_features: Option<u64>,
    pub ngram_range: Vec<u32>,
    pub min_df: f64,
    pub max_df: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogProbabilityStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Decode a section, falling back to its default when the shape is wrong
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Section<T> {
        Valid(T),
        Invalid(IgnoredAny),
    }

    Ok(match Section::<T>::deserialize(deserializer)? {
        Section::Valid(value) => value,
        Section::Invalid(_) => {
            log::warn!("Ignoring malformed analysis report section");
            T::default()
        }
    })
}
