//! Missing-element computation.

use std::collections::HashSet;
use std::time::Instant;

use crate::model::{Category, MissingElement, Snapshot};
use crate::{log_op_end, log_op_start};

/// Elements of `category` present in `origin` but absent from `final_`.
///
/// A mod missing from `final_` contributes all of its elements. Otherwise an
/// origin element is missing when no element with the identical id exists
/// under the same modid in `final_`. Mod identity is the snapshot map key.
pub fn compute_missing(
    origin: &Snapshot,
    final_: &Snapshot,
    category: Category,
) -> Vec<MissingElement> {
    log_op_start!("compute_missing", category = category.as_str());
    let start = Instant::now();

    let mut missing = Vec::new();
    for (modid, origin_mod) in origin.iter() {
        let origin_elements = origin_mod.elements(category);
        match final_.get(modid) {
            None => missing.extend(
                origin_elements
                    .iter()
                    .map(|e| MissingElement::from_element(modid, e)),
            ),
            Some(final_mod) => {
                let present: HashSet<&str> = final_mod
                    .elements(category)
                    .iter()
                    .map(|e| e.id.as_str())
                    .collect();
                missing.extend(
                    origin_elements
                        .iter()
                        .filter(|e| !present.contains(e.id.as_str()))
                        .map(|e| MissingElement::from_element(modid, e)),
                );
            }
        }
    }

    log_op_end!(
        "compute_missing",
        duration_ms = start.elapsed().as_millis() as u64,
        category = category.as_str(),
        missing_count = missing.len()
    );
    missing
}

/// Origin mods with no entry at all in `final_`, in origin order.
///
/// Informational: their elements are already reported by [`compute_missing`].
pub fn removed_mods<'a>(origin: &'a Snapshot, final_: &Snapshot) -> Vec<&'a str> {
    origin
        .iter()
        .map(|(modid, _)| modid)
        .filter(|modid| !final_.contains_mod(modid))
        .collect()
}
