//! Error handling for modbridge-store
//!
//! Wraps modbridge-core ExError with store-specific helpers

use std::path::Path;

use modbridge_core::errors::{BridgeError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Create a missing input file error
pub fn file_unavailable(path: &Path) -> ExError {
    BridgeError::SnapshotUnavailable {
        path: display(path),
    }
    .into()
}

/// Create an unparseable input file error
pub fn invalid_file(path: &Path, reason: impl std::fmt::Display) -> ExError {
    BridgeError::InvalidSnapshot {
        path: display(path),
        reason: reason.to_string(),
    }
    .into()
}

/// Create a write failure error for an output artifact
pub fn persistence_error(operation: &str, path: &Path, reason: impl std::fmt::Display) -> ExError {
    ExError::from(BridgeError::Persistence {
        path: display(path),
        reason: reason.to_string(),
    })
    .with_op(operation)
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation)
        .with_path(display(path))
        .with_message(err.to_string())
}
