//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default prediction API, only edit this file.

/// Default prediction API URL
///
/// Fallback when `KBK_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Local storage key holding the session token
pub const SESSION_KEY: &str = "mlk2_session_id";

/// Local storage key holding the selected model version
pub const SELECTED_MODEL_KEY: &str = "mlk2_selected_model";

/// Directory name under the platform data dir
pub const DATA_DIR_NAME: &str = "kbk-dashboard";

/// Local storage file name
pub const STORAGE_FILE: &str = "local_storage.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "KBK Dashboard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get prediction API URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("KBK_API_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Get local storage directory override, if any
pub fn get_data_dir() -> Option<std::path::PathBuf> {
    std::env::var("KBK_DATA_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(std::path::PathBuf::from)
}

/// Get request timeout. Unset or `0` means no timeout.
pub fn get_request_timeout() -> Option<u64> {
    std::env::var("KBK_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|secs| *secs > 0)
}
