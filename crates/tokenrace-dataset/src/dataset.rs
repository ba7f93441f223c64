//! Canonical dataset structures consumed by the race and event layers.

use serde::{Deserialize, Serialize};

/// Schema version written into every normalized dataset.
pub const DATASET_VERSION: &str = "0.1.0";

/// Ordered `(token, score)` attribution pairs against one reference text.
pub type TokenScores = Vec<(String, f64)>;

/// One attribution sequence per reference text scored in a round.
///
/// Condense games attribute against a single text, Contrast against two
/// (one to maximize, one to minimize), Synthesize against three.
pub type TokenScoresList = Vec<TokenScores>;

/// One model's record for one round.
///
/// Created by the normalizer; immutable afterward.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoundModel {
    /// Model identifier, stable across all rounds of a game.
    pub model: String,
    /// Round score for this model (finite by validation).
    pub score: f64,
    /// The free-text artifact the model submitted this round.
    #[serde(rename = "move")]
    pub move_text: String,
    /// Per-token attributions, one sequence per reference text.
    pub token_scores: TokenScoresList,
}

/// Canonical competition history: rounds in play order, each round holding
/// exactly one [`RoundModel`] per competing model.
///
/// The per-round model order is the order models appear in the raw export
/// and is identical in every round; downstream tie-breaking relies on it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dataset {
    /// Schema version, [`DATASET_VERSION`] for datasets built here.
    pub version: String,
    /// Rounds in play order.
    pub rounds: Vec<Vec<RoundModel>>,
}

impl Dataset {
    /// Number of rounds in the competition.
    #[must_use]
    pub fn rounds_len(&self) -> usize {
        self.rounds.len()
    }

    /// Model ids in first-round order, the canonical model ordering.
    ///
    /// Empty if the dataset has no rounds.
    #[must_use]
    pub fn model_ids(&self) -> Vec<&str> {
        self.rounds
            .first()
            .map(|round| round.iter().map(|r| r.model.as_str()).collect())
            .unwrap_or_default()
    }
}
