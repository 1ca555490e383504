//! Per-fetch view state
//!
//! `Idle -> Loading -> Loaded | Failed`. A terminal state is only left by
//! explicitly starting another fetch; nothing drops back to `Idle`.

use serde::Serialize;

use super::client::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum FetchState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Enter `Loading`, discarding any previous outcome
    pub fn begin(&mut self) {
        *self = FetchState::Loading;
    }

    /// Settle a fetch. Errors are logged here, at the view boundary.
    pub fn settle(&mut self, what: &str, outcome: Result<T, ApiError>) {
        *self = match outcome {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => {
                log::error!("Error fetching {}: {}", what, e);
                FetchState::Failed(e.to_string())
            }
        };
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Outcome of a finished fetch. An unfinished one counts as an error.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            FetchState::Loaded(value) => Ok(value),
            FetchState::Failed(e) => Err(e),
            FetchState::Idle | FetchState::Loading => Err("Not loaded".to_string()),
        }
    }
}
