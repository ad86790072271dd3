//! Run configuration
//!
//! Built once at startup (file values, then command-line overrides), validated,
//! and then only ever handed around as `&Config`.
//!
//! ```toml
//! [output]
//! base = "output"
//!
//! [output.blocks]
//! origin = "dc_blocks.json"
//! final = "rc_blocks.json"
//!
//! [correlate]
//! top_k = 30
//! checkpoint_every = 5
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::errors::{BridgeError, Result};
use crate::model::Category;
use crate::ranking::DEFAULT_TOP_K;

/// Resolved checkpoints are flushed after this many decisions
pub const DEFAULT_CHECKPOINT_EVERY: usize = 5;

/// Which pack a snapshot file describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Origin,
    Final,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub correlate: CorrelateConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory every input and output file is resolved against
    pub base: PathBuf,
    pub blocks: CategoryFiles,
    pub items: CategoryFiles,
    pub entities: CategoryFiles,
}

/// File names for one category; unset names fall back to `<role>_<category>.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryFiles {
    pub origin: Option<String>,
    #[serde(rename = "final")]
    pub final_: Option<String>,
    pub missing: Option<String>,
    pub correlations: Option<String>,
    pub progress: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorrelateConfig {
    /// Candidates shown per missing element
    pub top_k: usize,
    /// Resolutions between periodic checkpoints
    pub checkpoint_every: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from("output"),
            blocks: CategoryFiles::default(),
            items: CategoryFiles::default(),
            entities: CategoryFiles::default(),
        }
    }
}

impl Default for CorrelateConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
        }
    }
}

impl Config {
    /// Parse a TOML document; absent keys take their defaults
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the document is not valid TOML, has unknown keys,
    /// or fails [`Config::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| BridgeError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// `InvalidConfig` when `top_k` or `checkpoint_every` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.correlate.top_k == 0 {
            return Err(BridgeError::InvalidConfig {
                reason: "correlate.top_k must be at least 1".to_string(),
            });
        }
        if self.correlate.checkpoint_every == 0 {
            return Err(BridgeError::InvalidConfig {
                reason: "correlate.checkpoint_every must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn files(&self, category: Category) -> &CategoryFiles {
        match category {
            Category::Blocks => &self.output.blocks,
            Category::Items => &self.output.items,
            Category::Entities => &self.output.entities,
        }
    }

    fn resolve(&self, name: Option<&String>, role: &str, category: Category) -> PathBuf {
        match name {
            Some(name) => self.output.base.join(name),
            None => self
                .output
                .base
                .join(format!("{}_{}.json", role, category.as_str())),
        }
    }

    pub fn snapshot_path(&self, category: Category, side: Side) -> PathBuf {
        let files = self.files(category);
        match side {
            Side::Origin => self.resolve(files.origin.as_ref(), "origin", category),
            Side::Final => self.resolve(files.final_.as_ref(), "final", category),
        }
    }

    pub fn missing_path(&self, category: Category) -> PathBuf {
        self.resolve(self.files(category).missing.as_ref(), "missing", category)
    }

    pub fn correlations_path(&self, category: Category) -> PathBuf {
        self.resolve(
            self.files(category).correlations.as_ref(),
            "correlations",
            category,
        )
    }

    pub fn progress_path(&self, category: Category) -> PathBuf {
        self.resolve(
            self.files(category).progress.as_ref(),
            "replacement_progress",
            category,
        )
    }
}
