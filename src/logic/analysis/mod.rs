//! Analysis Views
//!
//! Four read-only views over the backend's analysis report:
//! - overview: headline metrics, model health, learning curve
//! - performance: CV folds, per-class metrics, confusion matrix
//! - naive_bayes: priors, confidence, misclassification, separability
//! - features: TF-IDF stats, log-probabilities, top features
//!
//! Views only reshape numbers: ratio to percentage conversions and
//! descending sorts for top-N lists. When the report cannot be loaded a
//! view falls back to the selected model's descriptor, if known.

pub mod features;
pub mod naive_bayes;
pub mod overview;
pub mod performance;
pub mod report;

pub use report::AnalysisReport;

use serde::Serialize;

use super::client::{ApiClient, ModelCatalog, ModelDescriptor, OrderedMap};
use super::fetch::FetchState;
use super::predict::format_percent;

/// `{label, value}` record for bar/pie charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub value: f64,
}

/// Turn a class → value mapping into chart rows, keeping backend order
pub fn chart_rows<V>(map: &OrderedMap<V>, value: impl Fn(&V) -> f64) -> Vec<ChartRow> {
    map.iter()
        .map(|(label, v)| ChartRow {
            label: label.to_string(),
            value: value(v),
        })
        .collect()
}

/// Lightweight stand-in when the full report is unavailable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub version: String,
    pub name: String,
    pub accuracy: String,
    pub cv_accuracy: String,
    pub created_at: Option<String>,
    pub description: Option<String>,
}

impl From<&ModelDescriptor> for ModelSummary {
    fn from(model: &ModelDescriptor) -> Self {
        Self {
            version: model.version.clone(),
            name: model.name.clone(),
            accuracy: format_percent(model.accuracy),
            cv_accuracy: format_percent(model.cv_accuracy),
            created_at: model.created_at.clone(),
            description: model.description.clone(),
        }
    }
}

/// What a view ended up showing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "view", rename_all = "snake_case")]
pub enum ReportView<V> {
    Report(V),
    Summary(ModelSummary),
}

/// Fetch the report for `model_version` and build one view from it.
///
/// On any failure, the descriptor of `model_version` (or the latest model
/// when nothing is selected) from `catalog` is shown instead. Without one
/// the state is `Failed`.
pub async fn load_view<V>(
    client: &ApiClient,
    model_version: Option<&str>,
    catalog: Option<&ModelCatalog>,
    build: impl FnOnce(&AnalysisReport) -> V,
) -> FetchState<ReportView<V>> {
    match client.analyze(model_version).await {
        Ok(report) => FetchState::Loaded(ReportView::Report(build(&report))),
        Err(e) => {
            log::error!("Error: {}", e);
            match catalog.and_then(|c| c.resolve(model_version)) {
                Some(model) => {
                    log::info!("Showing summary of v{} instead of full report", model.version);
                    FetchState::Loaded(ReportView::Summary(ModelSummary::from(model)))
                }
                None => FetchState::Failed(e.to_string()),
            }
        }
    }
}
