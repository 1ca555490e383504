//! Prediction API Client
//!
//! HTTP client for the KBK prediction/analysis service. Every call is a
//! single request: no retry, no backoff, and no timeout unless configured.

pub mod ordered;
pub mod types;

pub use ordered::OrderedMap;
pub use types::*;

use std::time::Duration;

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::logic::analysis::AnalysisReport;
use crate::logic::config::DashboardConfig;

/// Prediction API client
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create new API client
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.api_url.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus `segments`, each percent-encoded as one path segment
    fn resource_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        // Dot segments would be dropped by the URL parser and shift the target
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ApiError::InvalidRequest(format!("'{}' is not a valid id", bad)));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/models/`
    pub async fn list_models(&self) -> Result<ModelCatalog, ApiError> {
        let url = format!("{}/api/models/", self.base_url);
        let response = self.http_client.get(&url).send().await.map_err(network)?;
        read_json(response).await
    }

    /// `GET /api/analyze/[?model_version=v]`
    pub async fn analyze(&self, model_version: Option<&str>) -> Result<AnalysisReport, ApiError> {
        let url = format!("{}/api/analyze/", self.base_url);
        let mut request = self.http_client.get(&url);
        if let Some(version) = model_version.filter(|v| !v.is_empty()) {
            request = request.query(&[("model_version", version)]);
        }

        log::debug!("Fetching analysis report (model={:?})", model_version);
        let response = request.send().await.map_err(network)?;
        read_json(response).await
    }

    /// `POST /api/predict/`
    pub async fn predict(
        &self,
        judul: &str,
        model_version: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<PredictionResult, ApiError> {
        let url = format!("{}/api/predict/", self.base_url);
        let request = PredictRequest {
            judul,
            model_version: model_version.filter(|v| !v.is_empty()),
            session_id: session_id.filter(|s| !s.is_empty()),
        };

        log::debug!("Predicting with model {:?}", request.model_version);
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    /// `GET /api/history/?session_id=<id>`
    pub async fn history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = format!("{}/api/history/", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("session_id", session_id)])
            .send()
            .await
            .map_err(network)?;
        let body: HistoryResponse = read_json(response).await?;
        Ok(body.history)
    }

    /// `POST /api/history/clear/`
    pub async fn clear_history(&self, session_id: &str) -> Result<Acknowledgement, ApiError> {
        let url = format!("{}/api/history/clear/", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&ClearHistoryRequest { session_id })
            .send()
            .await
            .map_err(network)?;
        read_ack(response).await
    }

    /// `DELETE /api/history/<id>/?session_id=<id>`
    pub async fn delete_history(
        &self,
        session_id: &str,
        history_id: &str,
    ) -> Result<Acknowledgement, ApiError> {
        let url = self.resource_url(&["api", "history", history_id, ""])?;
        let response = self
            .http_client
            .delete(url)
            .query(&[("session_id", session_id)])
            .send()
            .await
            .map_err(network)?;
        read_ack(response).await
    }

    /// `GET /api/health/`
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/api/health/", self.base_url);
        let response = self.http_client.get(&url).send().await.map_err(network)?;
        read_json(response).await
    }

    /// `POST /api/train/`
    pub async fn train(&self) -> Result<TrainResponse, ApiError> {
        let url = format!("{}/api/train/", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }
}

fn network(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Decode a response body, surfacing non-2xx statuses and `{ "error": ... }`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    decode_body(status, &body)
}

/// Acknowledgements may come back with an empty body
async fn read_ack(response: Response) -> Result<Acknowledgement, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    if status.is_success() && body.trim().is_empty() {
        return Ok(Acknowledgement::default());
    }
    decode_body(status, &body)
}

pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    let reported = serde_json::from_str::<ErrorProbe>(body)
        .ok()
        .and_then(|probe| probe.error)
        .map(|e| match e {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    if !status.is_success() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            body: reported.unwrap_or_else(|| body.to_string()),
        });
    }

    if let Some(message) = reported {
        return Err(ApiError::Backend(message));
    }

    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Prediction API errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    /// Body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend reported `{ "error": ... }`
    #[error("Backend error: {0}")]
    Backend(String),

    /// Request could not be built (bad base URL or id)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests;
