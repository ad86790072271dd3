//! ModBridge Store - JSON artifact persistence
//!
//! Provides:
//! - Atomic temp-then-rename file writes
//! - Snapshot and missing-element loading with typed failures
//! - The file-backed checkpoint sink used by correlation sessions
//!
//! Every artifact is UTF-8 JSON, pretty-printed with four-space indentation.

pub mod artifacts;
pub mod atomic;
pub mod errors;
pub mod json;
pub mod progress;

// Re-export key types
pub use artifacts::{load_mapping, load_missing, load_snapshot, save_missing};
pub use errors::Result;
pub use progress::ProgressStore;
