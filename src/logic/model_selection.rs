//! Model Selection
//!
//! Which trained model version the views should use. The selection is a
//! plain value owned by the caller and handed to each view explicitly;
//! this module only hydrates it from local storage and writes changes back.

use super::client::{ApiClient, ModelCatalog};
use super::fetch::FetchState;
use super::storage::{LocalStore, StorageError};
use crate::constants::SELECTED_MODEL_KEY;

/// Selected model version, persisted on every change
pub struct ModelSelection<'a> {
    store: &'a dyn LocalStore,
    selected: String,
}

impl<'a> ModelSelection<'a> {
    /// Hydrate from storage. Empty means "no model chosen yet".
    pub fn hydrate(store: &'a dyn LocalStore) -> Self {
        let selected = store.get_item(SELECTED_MODEL_KEY).unwrap_or_default();
        Self { store, selected }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// `None` when nothing is selected
    pub fn version(&self) -> Option<&str> {
        Some(self.selected.as_str()).filter(|v| !v.is_empty())
    }

    /// Set and write through to storage
    pub fn select(&mut self, version: &str) -> Result<(), StorageError> {
        self.selected = version.to_string();
        self.store.set_item(SELECTED_MODEL_KEY, version)?;
        log::info!("Selected model v{}", version);
        Ok(())
    }

    /// Adopt `latest` only if nothing is selected. Returns whether it did.
    pub fn adopt_default(&mut self, latest: Option<&str>) -> bool {
        match latest.filter(|v| !v.is_empty()) {
            Some(latest) if self.selected.is_empty() => {
                if let Err(e) = self.select(latest) {
                    log::warn!("Could not persist default model: {}", e);
                }
                true
            }
            _ => false,
        }
    }
}

/// Fetch the model catalog and adopt its latest version as the default
pub async fn load_models(
    client: &ApiClient,
    selection: &mut ModelSelection<'_>,
) -> FetchState<ModelCatalog> {
    let mut state = FetchState::Loading;
    state.settle("models", client.list_models().await);

    if let Some(catalog) = state.loaded() {
        selection.adopt_default(catalog.latest.as_deref());
    }
    state
}

/// Catalog as optional metadata: a failure is a warning, not a view error
pub async fn load_model_metadata(
    client: &ApiClient,
    selection: &mut ModelSelection<'_>,
) -> Option<ModelCatalog> {
    match client.list_models().await {
        Ok(catalog) => {
            selection.adopt_default(catalog.latest.as_deref());
            Some(catalog)
        }
        Err(e) => {
            log::warn!("Model metadata unavailable: {}", e);
            None
        }
    }
}

/// Display line used by the model picker
pub fn describe(model: &super::client::ModelDescriptor) -> String {
    format!(
        "v{} - {} (Acc: {:.1}%)",
        model.version,
        model.name,
        model.cv_accuracy * 100.0
    )
}
