//! File-backed checkpoint sink.
//!
//! One store per category: a checkpoint file that exists only while a batch
//! is unfinished, and the final mapping written when the queue drains.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use modbridge_core::model::{Category, ProgressCheckpoint, ReplacementMapping};
use modbridge_core::session::CheckpointSink;
use modbridge_core::{log_op_end, log_op_error, log_op_start, Config};

use crate::errors::{persistence_error, Result};
use crate::json::{read_json, write_json};

#[derive(Debug, Clone)]
pub struct ProgressStore {
    checkpoint_path: PathBuf,
    final_path: PathBuf,
}

impl ProgressStore {
    pub fn new(checkpoint_path: impl Into<PathBuf>, final_path: impl Into<PathBuf>) -> Self {
        Self {
            checkpoint_path: checkpoint_path.into(),
            final_path: final_path.into(),
        }
    }

    /// Paths configured for `category`
    pub fn for_category(config: &Config, category: Category) -> Self {
        Self::new(
            config.progress_path(category),
            config.correlations_path(category),
        )
    }

    pub fn checkpoint_path(&self) -> &Path {
        &self.checkpoint_path
    }

    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// The saved checkpoint, if a batch was left unfinished.
    ///
    /// A checkpoint without `remaining` (older format) loads with an empty list;
    /// the session recomputes it anyway.
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` if the file exists but is corrupt. The file is left in
    /// place so no saved work is lost.
    pub fn load_checkpoint(&self) -> Result<Option<ProgressCheckpoint>> {
        if !self.checkpoint_path.exists() {
            return Ok(None);
        }
        let checkpoint: ProgressCheckpoint = read_json(&self.checkpoint_path)?;
        tracing::info!(
            op = "load_checkpoint",
            path = %self.checkpoint_path.display(),
            resolved_count = checkpoint.mapping.len()
        );
        Ok(Some(checkpoint))
    }

    fn write_logged<T: serde::Serialize>(
        &self,
        op: &'static str,
        path: &Path,
        value: &T,
        resolved_count: usize,
    ) -> Result<()> {
        let path_str = path.display().to_string();
        log_op_start!(op, path = %path_str, resolved_count = resolved_count);
        let start = Instant::now();

        write_json(path, value)
            .map_err(|e| persistence_error(op, path, e.message()))
            .map_err(|e| {
                log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
                e
            })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path_str
        );
        Ok(())
    }
}

impl CheckpointSink for ProgressStore {
    fn save_checkpoint(&mut self, checkpoint: &ProgressCheckpoint) -> Result<()> {
        self.write_logged(
            "save_checkpoint",
            &self.checkpoint_path,
            checkpoint,
            checkpoint.mapping.len(),
        )
    }

    fn save_final(&mut self, mapping: &ReplacementMapping) -> Result<()> {
        self.write_logged("save_final", &self.final_path, mapping, mapping.len())
    }

    fn clear_checkpoint(&mut self) -> Result<()> {
        match fs::remove_file(&self.checkpoint_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence_error(
                "clear_checkpoint",
                &self.checkpoint_path,
                e,
            )),
        }
    }
}
