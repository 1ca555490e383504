//! Dashboard Commands - API for the CLI
//!
//! One function per user action. Each builds the panel/view it needs,
//! runs it against the backend and returns a serializable response that
//! the CLI renders (or prints as JSON).

use serde::Serialize;

use crate::logic::analysis::{self, features, naive_bayes, overview, performance, ReportView};
use crate::logic::client::{ApiClient, HealthStatus, ModelCatalog, TrainResponse};
use crate::logic::config::DashboardConfig;
use crate::logic::history::{ClearOutcome, Confirmation, HistoryPanel, HistoryRow};
use crate::logic::model_selection::{self, ModelSelection};
use crate::logic::predict::{PredictPanel, ProbabilityRow, SubmitOutcome};
use crate::logic::session;
use crate::logic::storage::{self, LocalStore};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Entry of the model picker
#[derive(Debug, Clone, Serialize)]
pub struct ModelChoice {
    pub version: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelChoice>,
    pub latest: Option<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectResponse {
    pub selected: String,
}

/// Prediction on display, either fresh or replayed from history
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub title: String,
    pub predicted_kbk: String,
    pub model_version: String,
    pub probabilities: Vec<ProbabilityRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub deleted: String,
    /// `None` when the listing could not be loaded before the delete
    pub remaining: Option<Vec<HistoryRow>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub storage_dir: String,
    pub reset: bool,
}

/// Analysis page requested from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPage {
    Overview,
    Performance,
    NaiveBayes,
    Features,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "snake_case")]
pub enum AnalysisResponse {
    Overview(ReportView<overview::OverviewView>),
    Performance(ReportView<performance::PerformanceView>),
    NaiveBayes(ReportView<naive_bayes::NaiveBayesView>),
    Features(ReportView<features::FeaturesView>),
}

// ============================================================================
// DASHBOARD
// ============================================================================

/// Client, local storage and config shared by every command
pub struct Dashboard {
    config: DashboardConfig,
    client: ApiClient,
    store: Box<dyn LocalStore>,
}

impl Dashboard {
    /// Open with disk storage (memory if the data dir is unusable)
    pub fn open(config: DashboardConfig) -> Result<Self, String> {
        let store = storage::open_or_fallback(&config.storage_dir());
        Self::with_store(config, store)
    }

    pub fn with_store(config: DashboardConfig, store: Box<dyn LocalStore>) -> Result<Self, String> {
        let client = ApiClient::new(&config).map_err(|e| e.to_string())?;
        log::debug!("Dashboard using API {}", client.base_url());
        Ok(Self { config, client, store })
    }

    pub fn session_id(&self) -> String {
        session::session_id(self.store.as_ref())
    }

    fn selection(&self) -> ModelSelection<'_> {
        ModelSelection::hydrate(self.store.as_ref())
    }

    async fn catalog(&self, selection: &mut ModelSelection<'_>) -> Result<ModelCatalog, String> {
        model_selection::load_models(&self.client, selection)
            .await
            .into_result()
    }
}

// ============================================================================
// MODEL COMMANDS
// ============================================================================

/// List models, adopting the latest one when nothing is selected yet
pub async fn list_models(dash: &Dashboard) -> Result<ModelsResponse, String> {
    let mut selection = dash.selection();
    let catalog = dash.catalog(&mut selection).await?;

    let models = catalog
        .models
        .iter()
        .map(|m| ModelChoice {
            version: m.version.clone(),
            label: model_selection::describe(m),
            selected: m.version == selection.selected(),
        })
        .collect();

    Ok(ModelsResponse {
        models,
        latest: catalog.latest.clone(),
        selected: selection.version().map(str::to_string),
    })
}

/// Persist the selected model version
pub fn select_model(dash: &Dashboard, version: &str) -> Result<SelectResponse, String> {
    let version = version.trim();
    if version.is_empty() {
        return Err("Model version must not be empty".to_string());
    }

    let mut selection = dash.selection();
    selection.select(version).map_err(|e| e.to_string())?;
    Ok(SelectResponse {
        selected: version.to_string(),
    })
}

// ============================================================================
// PREDICTION COMMANDS
// ============================================================================

/// Classify a title. `Ok(None)` when the title is blank (no request made).
pub async fn predict(dash: &Dashboard, title: &str) -> Result<Option<PredictionView>, String> {
    let selection = dash.selection();
    let session_id = dash.session_id();
    let mut panel = PredictPanel::new();

    match panel
        .submit(&dash.client, title, selection.version(), &session_id)
        .await
    {
        SubmitOutcome::Ignored => Ok(None),
        SubmitOutcome::Predicted => Ok(prediction_view(&panel)),
        SubmitOutcome::Failed(e) => Err(e),
    }
}

fn prediction_view(panel: &PredictPanel) -> Option<PredictionView> {
    let result = panel.result()?;
    Some(PredictionView {
        title: panel.title().to_string(),
        predicted_kbk: result.predicted_kbk.clone(),
        model_version: result.model_version.clone(),
        probabilities: panel.rows(),
    })
}

// ============================================================================
// HISTORY COMMANDS
// ============================================================================

async fn loaded_history<'a>(dash: &'a Dashboard, session_id: &str) -> Result<HistoryPanel<'a>, String> {
    let mut panel = HistoryPanel::new(&dash.client, session_id);
    panel.refresh().await;
    match panel.state().error() {
        Some(e) => Err(e.to_string()),
        None => Ok(panel),
    }
}

/// This session's predictions, newest first as the backend returns them
pub async fn history_list(dash: &Dashboard) -> Result<Vec<HistoryRow>, String> {
    let session_id = dash.session_id();
    let panel = loaded_history(dash, &session_id).await?;
    Ok(panel.rows())
}

/// Replay a past entry into the prediction view
pub async fn history_show(dash: &Dashboard, history_id: &str) -> Result<PredictionView, String> {
    let session_id = dash.session_id();
    let panel = loaded_history(dash, &session_id).await?;

    let mut predict = PredictPanel::new();
    panel
        .select(history_id, &mut predict)
        .ok_or_else(|| format!("No history entry '{}'", history_id))?;
    prediction_view(&predict).ok_or_else(|| format!("No history entry '{}'", history_id))
}

/// Delete one entry; the listing is filtered even if the backend call fails
pub async fn history_delete(dash: &Dashboard, history_id: &str) -> Result<DeleteResponse, String> {
    let session_id = dash.session_id();
    let mut panel = HistoryPanel::new(&dash.client, &session_id);
    panel.refresh().await;

    panel.delete(history_id).await?;
    let remaining = panel.state().loaded().map(|_| panel.rows());
    Ok(DeleteResponse {
        deleted: history_id.to_string(),
        remaining,
    })
}

/// Clear all entries of the session once `confirmation` agrees
pub async fn history_clear(
    dash: &Dashboard,
    confirmation: &dyn Confirmation,
) -> Result<ClearResponse, String> {
    let session_id = dash.session_id();
    let mut panel = HistoryPanel::new(&dash.client, &session_id);

    match panel.clear(confirmation).await {
        ClearOutcome::Cleared => Ok(ClearResponse { cleared: true }),
        ClearOutcome::Declined => Ok(ClearResponse { cleared: false }),
        ClearOutcome::Failed(e) => Err(e),
    }
}

// ============================================================================
// ANALYSIS COMMANDS
// ============================================================================

/// Render one analysis page for `model_version` (default: the selection)
pub async fn analyze(
    dash: &Dashboard,
    page: AnalysisPage,
    model_version: Option<&str>,
) -> Result<AnalysisResponse, String> {
    let mut selection = dash.selection();
    // Model metadata only feeds the fallback summary
    let catalog = model_selection::load_model_metadata(&dash.client, &mut selection).await;

    let version = model_version
        .filter(|v| !v.is_empty())
        .or_else(|| selection.version())
        .map(str::to_string);
    let version = version.as_deref();
    let catalog = catalog.as_ref();
    let client = &dash.client;

    match page {
        AnalysisPage::Overview => {
            analysis::load_view(client, version, catalog, overview::build)
                .await
                .into_result()
                .map(AnalysisResponse::Overview)
        }
        AnalysisPage::Performance => {
            analysis::load_view(client, version, catalog, performance::build)
                .await
                .into_result()
                .map(AnalysisResponse::Performance)
        }
        AnalysisPage::NaiveBayes => {
            analysis::load_view(client, version, catalog, naive_bayes::build)
                .await
                .into_result()
                .map(AnalysisResponse::NaiveBayes)
        }
        AnalysisPage::Features => {
            analysis::load_view(client, version, catalog, features::build)
                .await
                .into_result()
                .map(AnalysisResponse::Features)
        }
    }
}

// ============================================================================
// SESSION / BACKEND COMMANDS
// ============================================================================

/// Show the session token, optionally starting a new session first
pub fn session_info(dash: &Dashboard, reset: bool) -> Result<SessionResponse, String> {
    if reset {
        session::reset(dash.store.as_ref()).map_err(|e| e.to_string())?;
    }

    Ok(SessionResponse {
        session_id: dash.session_id(),
        storage_dir: dash.config.storage_dir().display().to_string(),
        reset,
    })
}

pub async fn health(dash: &Dashboard) -> Result<HealthStatus, String> {
    dash.client.health().await.map_err(|e| e.to_string())
}

/// Ask the backend to retrain; the new model shows up in `list_models`
pub async fn train(dash: &Dashboard) -> Result<TrainResponse, String> {
    log::info!("Requesting model training");
    dash.client.train().await.map_err(|e| e.to_string())
}
