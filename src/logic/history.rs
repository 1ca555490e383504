//! History Panel
//!
//! Past predictions for the current session. The backend owns the entries;
//! this panel keeps the last listing and filters it locally on delete.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use super::client::{ApiClient, HistoryEntry};
use super::fetch::FetchState;
use super::predict::{format_percent, PredictPanel};

/// Asked before destructive operations
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Pre-answered confirmation (`--yes`, tests)
pub struct Preconfirmed(pub bool);

impl Confirmation for Preconfirmed {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClearOutcome {
    Declined,
    Cleared,
    Failed(String),
}

/// Display row for one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub when: String,
    pub model: String,
    pub judul: String,
    pub predicted_kbk: String,
    pub confidence: String,
}

pub struct HistoryPanel<'a> {
    client: &'a ApiClient,
    session_id: String,
    entries: FetchState<Vec<HistoryEntry>>,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(client: &'a ApiClient, session_id: &str) -> Self {
        Self {
            client,
            session_id: session_id.to_string(),
            entries: FetchState::Idle,
        }
    }

    pub fn state(&self) -> &FetchState<Vec<HistoryEntry>> {
        &self.entries
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        self.entries.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// (Re)load this session's entries
    pub async fn refresh(&mut self) {
        if self.session_id.is_empty() {
            return;
        }
        self.entries.begin();
        let outcome = self.client.history(&self.session_id).await;
        self.entries.settle("history", outcome);
    }

    /// Copy an entry into the prediction panel. No backend call.
    pub fn select(&self, history_id: &str, panel: &mut PredictPanel) -> Option<HistoryEntry> {
        let entry = self.entries().iter().find(|e| e.id == history_id)?.clone();
        panel.load_entry(&entry);
        Some(entry)
    }

    /// Remove one entry locally, then ask the backend to delete it
    pub async fn delete(&mut self, history_id: &str) -> Result<(), String> {
        if let FetchState::Loaded(entries) = &mut self.entries {
            entries.retain(|e| e.id != history_id);
        }

        match self.client.delete_history(&self.session_id, history_id).await {
            Ok(_) => {
                log::info!("Deleted history {}", history_id);
                Ok(())
            }
            Err(e) => {
                log::error!("Error deleting history: {}", e);
                Err(e.to_string())
            }
        }
    }

    /// Clear every entry of the session after confirmation
    pub async fn clear(&mut self, confirmation: &dyn Confirmation) -> ClearOutcome {
        if self.session_id.is_empty() || !confirmation.confirm("Clear all history?") {
            return ClearOutcome::Declined;
        }

        match self.client.clear_history(&self.session_id).await {
            Ok(ack) => {
                log::info!("Cleared history ({:?} entries)", ack.deleted);
                self.entries = FetchState::Loaded(Vec::new());
                ClearOutcome::Cleared
            }
            Err(e) => {
                log::error!("Error clearing history: {}", e);
                ClearOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn rows(&self) -> Vec<HistoryRow> {
        self.entries().iter().map(history_row).collect()
    }
}

pub fn history_row(entry: &HistoryEntry) -> HistoryRow {
    HistoryRow {
        id: entry.id.clone(),
        when: format_timestamp(&entry.timestamp),
        model: format!("v{}", entry.model_version),
        judul: entry.judul.clone(),
        predicted_kbk: entry.predicted_kbk.clone(),
        confidence: format_percent(top_probability(entry)),
    }
}

/// Highest probability of the entry, 0 when empty
pub fn top_probability(entry: &HistoryEntry) -> f64 {
    entry.probabilities.values().copied().fold(0.0, f64::max)
}

/// `2025-06-01T09:00:00` → `01 Jun 09:00`. Unparseable input is shown as-is.
pub fn format_timestamp(timestamp: &str) -> String {
    const FORMAT: &str = "%d %b %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(FORMAT).to_string();
    }
    timestamp.to_string()
}
