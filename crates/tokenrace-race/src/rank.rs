//! Shared best-score ranking.
//!
//! Leaders, finalists, final ranks, and several event detectors all rank a
//! frame by `best_score`. They must agree exactly on tie-breaks, so there is
//! one implementation: descending score, stable on ties (frame insertion
//! order wins).

use crate::race::AugmentedRoundModel;

/// Rank a frame's entries by `best_score`, highest first.
///
/// The sort is stable: entries with equal scores keep their frame order.
#[must_use]
pub fn rank_by_best_score(frame: &[AugmentedRoundModel]) -> Vec<&AugmentedRoundModel> {
    let mut ranked: Vec<_> = frame.iter().collect();
    ranked.sort_by(|a, b| b.best_score.total_cmp(&a.best_score));
    ranked
}

/// 1-based rank of `model` within `frame` by `best_score`, or `None` if the
/// model has no entry.
#[must_use]
pub fn rank_of(frame: &[AugmentedRoundModel], model: &str) -> Option<usize> {
    rank_by_best_score(frame)
        .iter()
        .position(|entry| entry.model == model)
        .map(|index| index + 1)
}
