//! Offering to continue from a saved checkpoint.

use super::operator::{ask_yes_no, Operator};
use crate::errors::{BridgeError, ExError};
use crate::model::{MissingElement, ProgressCheckpoint, ReplacementMapping};

/// Decide which mapping a new session starts from.
///
/// Without a checkpoint the session starts empty. Otherwise the operator is
/// told how many replacements were saved and asked whether to continue;
/// declining discards them. Saved keys that no longer name a missing element
/// are kept and reported.
///
/// # Errors
///
/// `ExErrorKind::InputClosed` if input ends before the operator answers, and
/// terminal I/O failures.
pub fn negotiate_resume<O: Operator>(
    operator: &mut O,
    checkpoint: Option<ProgressCheckpoint>,
    missing: &[MissingElement],
) -> Result<ReplacementMapping, ExError> {
    let Some(checkpoint) = checkpoint else {
        return Ok(ReplacementMapping::new());
    };

    operator.say(&format!(
        "Previous progress loaded: {} replacements already made.",
        checkpoint.mapping.len()
    ))?;

    let stale = checkpoint.mapping.stale_keys(missing);
    if !stale.is_empty() {
        tracing::warn!(
            op = "negotiate_resume",
            stale_count = stale.len(),
            "checkpoint holds keys that are no longer missing"
        );
        let names: Vec<&str> = stale.iter().map(|k| k.as_str()).collect();
        operator.say(&format!(
            "Note: {} saved replacements refer to elements that are no longer missing: {}",
            stale.len(),
            names.join(", ")
        ))?;
    }

    match ask_yes_no(operator, "Do you want to continue from where you left off?")? {
        Some(true) => Ok(checkpoint.mapping),
        Some(false) => {
            operator.say("Restarting from the beginning...")?;
            Ok(ReplacementMapping::new())
        }
        None => Err(BridgeError::OperatorInputClosed.into()),
    }
}
