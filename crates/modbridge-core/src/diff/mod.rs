//! Origin/final snapshot diff.
//!
//! Finds, per category, every element registered in the origin pack that the
//! final pack no longer registers under the same mod.
//!
//! ## Entry point
//!
//! ```ignore
//! use modbridge_core::diff::compute_missing;
//!
//! let missing = compute_missing(&origin, &final_, Category::Blocks);
//! ```
//!
//! ## Guarantees
//!
//! - **Exactness**: ids are compared by plain string equality; no normalization.
//! - **Order**: output follows origin mod order, then element order.
//! - **Purity**: no I/O; each category is computed independently.

pub mod engine;
pub mod summary;

pub use engine::{compute_missing, removed_mods};
pub use summary::{render_summary, CategoryReport, DiffReport};
