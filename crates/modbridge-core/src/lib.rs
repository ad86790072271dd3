//! ModBridge Core - modpack migration kernel
//!
//! This crate holds everything that does not touch the filesystem:
//! - Snapshot, element and replacement-mapping models
//! - The diff engine that finds elements lost between two packs
//! - Candidate ranking by weighted id/name similarity
//! - The interactive correlation session and its checkpoint contract
//! - Configuration, error taxonomy and structured logging
//!
//! Reading and writing JSON artifacts lives in `modbridge-store`.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ranking;
pub mod session;
pub mod visualizer;

// Re-export commonly used types
pub use config::{Config, Side};
pub use diff::{compute_missing, render_summary, CategoryReport, DiffReport};
pub use errors::{BridgeError, ExError, ExErrorKind, Result};
pub use model::{
    Category, Element, ElementKey, MissingElement, ModEntry, ProgressCheckpoint,
    ReplacementMapping, Snapshot,
};
pub use ranking::{rank_candidates, CandidateScore};
pub use session::{
    negotiate_resume, CheckpointSink, ConsoleOperator, CorrelationSession, Decision, Operator,
    SessionOutcome,
};
pub use visualizer::{NoopVisualizer, Visualizer};
