//! Wire types for the prediction API

use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;

// ============================================================================
// MODELS
// ============================================================================

/// Trained classifier version as listed by `/api/models/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub cv_accuracy: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl ModelCatalog {
    pub fn find(&self, version: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.version == version)
    }

    /// Descriptor for `selected`, or the latest one when nothing is selected
    pub fn resolve(&self, selected: Option<&str>) -> Option<&ModelDescriptor> {
        match selected.filter(|v| !v.is_empty()) {
            Some(version) => self.find(version),
            None => self.latest.as_deref().and_then(|v| self.find(v)),
        }
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub judul: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_kbk: String,
    #[serde(default)]
    pub probabilities: OrderedMap<f64>,
    #[serde(default)]
    pub model_version: String,
}

// ============================================================================
// HISTORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub judul: String,
    pub predicted_kbk: String,
    #[serde(default)]
    pub probabilities: OrderedMap<f64>,
    #[serde(default)]
    pub model_version: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryRequest<'a> {
    pub session_id: &'a str,
}

/// Generic success acknowledgement for destructive calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted: Option<u64>,
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub redis: Option<serde_json::Value>,
    #[serde(default)]
    pub models_available: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Only used to detect `{ "error": ... }` bodies
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorProbe {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}
