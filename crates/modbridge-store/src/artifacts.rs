//! Snapshot, missing-element and mapping files.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::time::Instant;

use modbridge_core::model::{MissingElement, ReplacementMapping, Snapshot};
use modbridge_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{persistence_error, Result};
use crate::json::{read_json, write_json};

/// Load an extracted snapshot (`modid -> mod entry`).
///
/// # Errors
///
/// `NotFound` if the file is absent, `InvalidSnapshot` if it is malformed.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let path_str = path.display().to_string();
    log_op_start!("load_snapshot", path = %path_str);
    let start = Instant::now();

    let snapshot: Snapshot = read_json(path).map_err(|e| {
        log_op_error!(
            "load_snapshot",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "load_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        path = %path_str,
        mod_count = snapshot.len()
    );
    Ok(snapshot)
}

/// Load the diff output consumed by a correlation session.
///
/// # Errors
///
/// `NotFound` if the diff has not been run, `InvalidSnapshot` if malformed.
pub fn load_missing(path: &Path) -> Result<Vec<MissingElement>> {
    let missing: Vec<MissingElement> = read_json(path)?;
    tracing::debug!(
        op = "load_missing",
        path = %path.display(),
        missing_count = missing.len()
    );
    Ok(missing)
}

/// Write the diff output for one category.
///
/// # Errors
///
/// `Persistence` if the file cannot be written.
pub fn save_missing(path: &Path, missing: &[MissingElement]) -> Result<()> {
    write_json(path, missing).map_err(|e| persistence_error("save_missing", path, e.message()))?;
    tracing::info!(
        op = "save_missing",
        path = %path.display(),
        missing_count = missing.len()
    );
    Ok(())
}

/// Load a completed replacement mapping.
///
/// # Errors
///
/// `NotFound` if absent, `InvalidSnapshot` if malformed.
pub fn load_mapping(path: &Path) -> Result<ReplacementMapping> {
    read_json(path)
}
