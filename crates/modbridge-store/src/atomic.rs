//! Atomic write primitives
//!
//! Readers see either the previous content or the new content, never a
//! partial file.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling temp path: `name.json` -> `name.json.tmp`
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically replace `target_path` with `content`.
///
/// Writes and syncs a temp file in the same directory, then renames it over
/// the target. The temp file is removed if any step fails.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
    }

    let temp_path = temp_path_for(target_path);
    let result = write_synced(&temp_path, content).and_then(|()| {
        fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_temp", target_path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| io_error("create_temp", path, e))?;
    file.write_all(content)
        .map_err(|e| io_error("write_temp", path, e))?;
    file.sync_all().map_err(|e| io_error("sync_temp", path, e))
}
