//! Correlate command
//!
//! Usage: modbridge correlate [--category <CATEGORY>] [--top-k <N>] [--base <DIR>]

use clap::Args;
use std::path::{Path, PathBuf};

use modbridge_core::{
    negotiate_resume, Category, ConsoleOperator, CorrelationSession, NoopVisualizer,
    SessionOutcome, Side,
};
use modbridge_store::{load_missing, load_snapshot, ProgressStore};

#[derive(Debug, Args)]
pub struct CorrelateArgs {
    /// Category whose missing elements are mapped
    #[arg(long, default_value = "blocks")]
    pub category: Category,

    /// Candidates shown per missing element
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Directory holding the snapshots and receiving the output
    #[arg(long)]
    pub base: Option<PathBuf>,
}

/// Execute correlate command
pub fn execute(
    config_path: Option<&Path>,
    args: CorrelateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, args.base, args.top_k)?;
    let category = args.category;

    let final_ = load_snapshot(&config.snapshot_path(category, Side::Final))?;
    let missing = load_missing(&config.missing_path(category))?;
    let mut store = ProgressStore::for_category(&config, category);
    let mut operator = ConsoleOperator::stdio();

    let checkpoint = store.load_checkpoint()?;
    let mapping = negotiate_resume(&mut operator, checkpoint, &missing)?;

    let outcome = CorrelationSession::new(
        &config,
        category,
        &final_,
        &missing,
        &mut operator,
        NoopVisualizer,
        &mut store,
    )
    .with_mapping(mapping)
    .run()?;

    match outcome {
        SessionOutcome::Completed { persisted: true, .. } => {
            println!("Replacements written to {}", store.final_path().display());
        }
        SessionOutcome::Exited {
            persisted: true,
            remaining,
            ..
        } => {
            println!(
                "{} elements left; progress kept in {}",
                remaining,
                store.checkpoint_path().display()
            );
        }
        SessionOutcome::Completed { .. } | SessionOutcome::Exited { .. } => {
            return Err("replacements could not be saved; copy them from the output above".into());
        }
    }
    Ok(())
}
