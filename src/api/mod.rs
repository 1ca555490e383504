//! API Module
//!
//! Structure:
//! - commands.rs: one function per dashboard action, used by the CLI
//!
//! Usage:
//! - `api::predict(&dashboard, title)` - classify a title
//! - `api::analyze(&dashboard, page, None)` - render an analysis page

pub mod commands;

pub use commands::*;
