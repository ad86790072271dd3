pub mod correlate;
pub mod diff;

use std::path::{Path, PathBuf};

use modbridge_core::errors::{BridgeError, ExError};
use modbridge_core::Config;

const DEFAULT_CONFIG_FILE: &str = "modbridge.toml";

/// Load the configuration file and apply command-line overrides.
///
/// An explicit `--config` must exist; the default file is optional.
pub fn load_config(
    explicit: Option<&Path>,
    base: Option<PathBuf>,
    top_k: Option<usize>,
) -> Result<Config, ExError> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let mut config = if explicit.is_some() || path.exists() {
        let text = std::fs::read_to_string(path).map_err(|e| BridgeError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Config::from_toml_str(&text)?
    } else {
        Config::default()
    };

    if let Some(base) = base {
        config.output.base = base;
    }
    if let Some(top_k) = top_k {
        config.correlate.top_k = top_k;
    }
    config.validate()?;

    tracing::debug!(
        op = "load_config",
        base = %config.output.base.display(),
        top_k = config.correlate.top_k,
        checkpoint_every = config.correlate.checkpoint_every
    );
    Ok(config)
}
