//! Candidate ranking for a missing element.
//!
//! Every element of the final pack is scored against the missing one; there
//! is no pre-filtering or index, since a modpack registry holds thousands of
//! entries rather than millions.

pub mod rank;
pub mod similarity;

pub use rank::{rank_candidates, score_candidate, CandidateScore, DEFAULT_TOP_K, ID_WEIGHT, NAME_WEIGHT};
pub use similarity::ratio;
