//! Prediction Panel
//!
//! Holds the submitted title and the last prediction on display. A failed
//! call keeps whatever was shown before.

use serde::Serialize;

use super::client::{ApiClient, HistoryEntry, OrderedMap, PredictionResult};

/// One row of the probability distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityRow {
    pub label: String,
    pub probability: f64,
    pub percent: String,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Title was blank; no request issued
    Ignored,
    Predicted,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct PredictPanel {
    title: String,
    result: Option<PredictionResult>,
}

impl PredictPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Classify `title` with the given model and session
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        title: &str,
        model_version: Option<&str>,
        session_id: &str,
    ) -> SubmitOutcome {
        self.title = title.to_string();
        if title.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        match client.predict(title, model_version, Some(session_id)).await {
            Ok(result) => {
                log::info!("Predicted '{}' ({})", result.predicted_kbk, result.model_version);
                self.result = Some(result);
                SubmitOutcome::Predicted
            }
            Err(e) => {
                log::error!("Error: {}", e);
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }

    /// Show a past entry as if it had just been predicted
    pub fn load_entry(&mut self, entry: &HistoryEntry) {
        self.title = entry.judul.clone();
        self.result = Some(PredictionResult {
            predicted_kbk: entry.predicted_kbk.clone(),
            probabilities: entry.probabilities.clone(),
            model_version: entry.model_version.clone(),
        });
    }

    /// Probability rows of the current result, highest first
    pub fn rows(&self) -> Vec<ProbabilityRow> {
        self.result
            .as_ref()
            .map(|r| ranked_probabilities(&r.probabilities))
            .unwrap_or_default()
    }
}

/// Sort a distribution descending. Ties keep backend order.
pub fn ranked_probabilities(probabilities: &OrderedMap<f64>) -> Vec<ProbabilityRow> {
    let mut rows: Vec<ProbabilityRow> = probabilities
        .iter()
        .map(|(label, p)| ProbabilityRow {
            label: label.to_string(),
            probability: *p,
            percent: format_percent(*p),
        })
        .collect();
    rows.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    rows
}

/// Ratio in [0,1] as a one-decimal percentage, e.g. `0.7` → `70.0%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
