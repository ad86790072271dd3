//! Weighted scoring and ordering of replacement candidates.

use serde::Serialize;

use super::similarity::ratio;
use crate::model::{Element, ElementKey, MissingElement, PoolEntry};

/// Candidates shown to the operator unless configured otherwise
pub const DEFAULT_TOP_K: usize = 30;

/// Ids survive mod updates better than display text, so they weigh more
pub const ID_WEIGHT: f64 = 0.6;
pub const NAME_WEIGHT: f64 = 0.4;

/// An existing element scored against one missing element
///
/// Computed per query; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub full_id: ElementKey,
    pub mod_name: String,
    pub id: String,
    pub display_name: Option<String>,
    pub similarity_score: f64,
}

/// Score `candidate` against a missing id and its lower-cased display name
pub fn score_candidate(missing_id: &str, missing_name_lower: &str, candidate: &Element) -> f64 {
    let id_similarity = ratio(missing_id, &candidate.id);
    let name_similarity = ratio(
        missing_name_lower,
        &candidate.name_or_empty().to_lowercase(),
    );
    (ID_WEIGHT * id_similarity + NAME_WEIGHT * name_similarity).clamp(0.0, 1.0)
}

/// Rank every pool entry against `missing` and keep the best `top_k`.
///
/// Output is sorted by descending score. The sort is stable, so equal scores
/// keep pool order and identical inputs always produce identical rankings.
pub fn rank_candidates<'a, I>(missing: &MissingElement, pool: I, top_k: usize) -> Vec<CandidateScore>
where
    I: IntoIterator<Item = PoolEntry<'a>>,
{
    let missing_name = missing.name_or_empty().to_lowercase();

    let mut scored: Vec<CandidateScore> = pool
        .into_iter()
        .map(|entry| CandidateScore {
            full_id: entry.key(),
            mod_name: entry.mod_name.to_string(),
            id: entry.element.id.clone(),
            display_name: entry.element.display_name.clone(),
            similarity_score: score_candidate(&missing.id, &missing_name, entry.element),
        })
        .collect();

    let pool_len = scored.len();
    scored.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
    scored.truncate(top_k);

    tracing::debug!(
        op = "rank_candidates",
        missing_key = %missing.key(),
        pool_len = pool_len,
        best_score = scored.first().map(|c| c.similarity_score).unwrap_or(0.0),
    );
    scored
}
