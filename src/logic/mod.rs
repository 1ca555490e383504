//! Logic Module - Dashboard state & backend access
//!
//! - `client/` - HTTP client for the prediction API
//! - `storage`, `session`, `model_selection` - client-side persisted state
//! - `predict`, `history` - prediction and history panels
//! - `analysis/` - read-only views over the analysis report

pub mod analysis;
pub mod client;
pub mod config;
pub mod fetch;
pub mod history;
pub mod model_selection;
pub mod predict;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
