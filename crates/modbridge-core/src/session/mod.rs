//! Interactive correlation loop.
//!
//! One missing element is open at a time. For each, the loop ranks the final
//! pack's elements (SEARCHING), shows the shortlist (PRESENTING) and waits for
//! the operator's [`Decision`]:
//!
//! - `1..=n` picks a candidate and resolves the element
//! - `0` ranks again without recording anything
//! - `-1` asks for a `modid:id` typed by hand, accepted only if it exists
//! - `-2` checkpoints and ends the whole batch
//!
//! Anything else re-prompts without re-ranking. Progress is checkpointed every
//! `checkpoint_every` resolutions and on exit; a fully drained queue writes the
//! final mapping and removes the checkpoint.

pub mod choice;
pub mod engine;
pub mod operator;
pub mod resume;

pub use choice::{parse_choice, Choice, Decision, InvalidChoice};
pub use engine::{CheckpointSink, CorrelationSession, SessionOutcome};
pub use operator::{ask_yes_no, ConsoleOperator, Operator};
pub use resume::negotiate_resume;
