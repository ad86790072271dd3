//! Operator decision parsing.

use crate::model::ElementKey;

/// Outcome of one PRESENTING round, consumed by the loop via pattern matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A replacement was chosen
    Resolved(ElementKey),
    /// Discard the shortlist and rank again
    Retry,
    /// Switch to typing an id by hand
    Manual,
    /// Checkpoint and end the batch
    Exit,
}

/// Why a line was not accepted as a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidChoice {
    NotANumber,
    OutOfRange(i64),
}

/// A raw line classified against the current shortlist length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// 1-based rank into the shortlist
    Rank(usize),
    Retry,
    Manual,
    Exit,
    Invalid(InvalidChoice),
}

/// Lowest accepted number (exit)
pub const MIN_CHOICE: i64 = -2;

/// Classify one line of operator input.
pub fn parse_choice(input: &str, candidate_count: usize) -> Choice {
    let Ok(number) = input.trim().parse::<i64>() else {
        return Choice::Invalid(InvalidChoice::NotANumber);
    };
    match number {
        0 => Choice::Retry,
        -1 => Choice::Manual,
        -2 => Choice::Exit,
        n if n >= 1 && (n as u64) <= candidate_count as u64 => Choice::Rank(n as usize),
        n => Choice::Invalid(InvalidChoice::OutOfRange(n)),
    }
}
