//! Diff command
//!
//! Usage: modbridge diff [--category <CATEGORY>]... [--base <DIR>]

use clap::Args;
use std::path::{Path, PathBuf};

use modbridge_core::{render_summary, Category, CategoryReport, DiffReport, Side};
use modbridge_store::{load_snapshot, save_missing};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Category to diff; repeat for several (default: all)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,

    /// Directory holding the snapshots and receiving the output
    #[arg(long)]
    pub base: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(config_path: Option<&Path>, args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, args.base, None)?;
    let categories = if args.categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        args.categories
    };

    // Every snapshot must load before any output file is touched
    let mut snapshots = Vec::with_capacity(categories.len());
    for category in categories {
        let origin = load_snapshot(&config.snapshot_path(category, Side::Origin))?;
        let final_ = load_snapshot(&config.snapshot_path(category, Side::Final))?;
        snapshots.push((category, origin, final_));
    }

    let mut report = DiffReport::default();
    for (category, origin, final_) in &snapshots {
        report.push(CategoryReport::compute(origin, final_, *category));
    }

    for entry in &report.categories {
        let out = config.missing_path(entry.category);
        save_missing(&out, &entry.missing)?;
        println!(
            "Wrote {} missing {} to {}",
            entry.missing.len(),
            entry.category,
            out.display()
        );
    }

    println!();
    print!("{}", render_summary(&report));
    Ok(())
}
