//! Human-readable summary of a multi-category diff run.

use crate::model::{Category, MissingElement, Snapshot};

use super::engine::{compute_missing, removed_mods};

/// Diff outcome for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category: Category,
    pub missing: Vec<MissingElement>,
    /// Origin mods absent from the final pack altogether
    pub removed_mods: Vec<String>,
}

impl CategoryReport {
    /// Diff one category of `origin` against `final_`
    pub fn compute(origin: &Snapshot, final_: &Snapshot, category: Category) -> Self {
        Self {
            category,
            missing: compute_missing(origin, final_, category),
            removed_mods: removed_mods(origin, final_)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Reports for every diffed category, in [`Category::ALL`] order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    pub categories: Vec<CategoryReport>,
}

impl DiffReport {
    pub fn push(&mut self, report: CategoryReport) {
        self.categories.push(report);
    }

    pub fn get(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|r| r.category == category)
    }

    pub fn total_missing(&self) -> usize {
        self.categories.iter().map(|r| r.missing.len()).sum()
    }
}

/// Render per-category counts as plain text.
///
/// Whole-mod removals are listed separately so the operator can spot packs
/// where a bulk replacement might apply; they do not change the counts.
pub fn render_summary(report: &DiffReport) -> String {
    let mut out = String::from("Missing element counts:\n");
    for entry in &report.categories {
        out.push_str(&format!(
            "- {}: {}\n",
            entry.category.as_str(),
            entry.missing.len()
        ));
    }

    let mut removed: Vec<&str> = report
        .categories
        .iter()
        .flat_map(|r| r.removed_mods.iter().map(String::as_str))
        .collect();
    removed.sort_unstable();
    removed.dedup();
    if !removed.is_empty() {
        out.push_str(&format!(
            "\nMods absent from the final pack ({}): {}\n",
            removed.len(),
            removed.join(", ")
        ));
    }
    out
}
