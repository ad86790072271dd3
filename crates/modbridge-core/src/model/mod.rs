pub mod element;
pub mod mapping;
pub mod snapshot;

pub use element::{Element, ElementKey, MissingElement, VariantInfo};
pub use mapping::{remaining_elements, ProgressCheckpoint, ReplacementMapping};
pub use snapshot::{Category, ModEntry, PoolEntry, Snapshot};
