//! Dashboard configuration
//!
//! Gathered once at startup from the environment (after `.env` is loaded)
//! and overridden by CLI flags.

use std::path::PathBuf;

use crate::constants;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the prediction API, without trailing slash
    pub api_url: String,

    /// Where local storage lives. `None` means the platform default.
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: normalize_url(constants::DEFAULT_API_URL),
            data_dir: None,
            timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: normalize_url(&constants::get_api_url()),
            data_dir: constants::get_data_dir(),
            timeout_secs: constants::get_request_timeout(),
        }
    }

    /// Override the API URL (from `--api-url`)
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = normalize_url(url);
        self
    }

    /// Resolve the local storage directory
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(constants::DATA_DIR_NAME)
        })
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
