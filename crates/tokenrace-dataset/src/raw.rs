//! Serde model of the raw benchmark export.
//!
//! A benchmark export file wraps a `game_results` array of per-model game
//! logs. Each log names the game it was recorded for (name + map seed), the
//! participating player (the model), and an ordered list of per-round
//! results. A round result carries a score per side label and an event
//! history mixing move submissions (`elicit_response`), reward attributions
//! (`reward`), and harness events this crate does not interpret.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dataset::TokenScores;

/// Side label under which the competition score is recorded.
pub const SIDE_LABEL: &str = "black";

/// A full benchmark export file: one log per (game, model) pairing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBenchmark {
    pub game_results: Vec<RawGameLog>,
}

/// One model's complete log for one game instance.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGameLog {
    pub game: RawGameSetup,
    /// Per-round results in play order.
    pub game_results: Vec<RawRoundResult>,
}

impl RawGameLog {
    /// Identity of the game instance this log belongs to.
    #[must_use]
    pub fn identity(&self) -> (&str, u64) {
        (&self.game.game.name, self.game.game.map_seed)
    }

    /// Id of the model that played this log, if a player is recorded.
    #[must_use]
    pub fn model_id(&self) -> Option<&str> {
        self.game.players.first().map(|p| p.id.as_str())
    }
}

/// Game configuration header of a log.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGameSetup {
    pub game: RawGameIdentity,
    pub players: Vec<RawPlayer>,
}

/// Identifies one game instance; all logs of a dataset must agree on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawGameIdentity {
    pub name: String,
    pub map_seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub id: String,
}

/// One round of one model's log.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoundResult {
    /// Final scores keyed by side label; the model's score sits under
    /// [`SIDE_LABEL`].
    pub scores: BTreeMap<String, f64>,
    /// Recorded events for the round, in emission order.
    pub xrt_history: Vec<RawHistoryEvent>,
}

impl RawRoundResult {
    /// Reward events of this round, in history order.
    #[must_use]
    pub fn reward_events(&self) -> Vec<&RawRewardValue> {
        self.xrt_history
            .iter()
            .filter_map(|event| match event {
                RawHistoryEvent::Reward { value } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Move submissions of this round, in history order.
    #[must_use]
    pub fn elicit_responses(&self) -> Vec<&str> {
        self.xrt_history
            .iter()
            .filter_map(|event| match event {
                RawHistoryEvent::ElicitResponse { response } => Some(response.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A typed entry of a round's event history.
///
/// Histories interleave many harness event types; only move submissions and
/// reward attributions matter here, everything else folds into `Other`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RawHistoryEvent {
    #[serde(rename = "elicit_response")]
    ElicitResponse { response: String },
    #[serde(rename = "reward")]
    Reward { value: RawRewardValue },
    #[serde(other)]
    Other,
}

/// Payload of a reward event: the attribution direction and the per-token
/// scores against one reference text.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRewardValue {
    /// Attribution scale; `1` rewards likelihood gains, `-1` rewards losses.
    pub scale: f64,
    /// `(token, score)` pairs in text order.
    pub pairs: TokenScores,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_round() -> serde_json::Value {
        serde_json::json!({
            "scores": { "black": 12.5, "white": 0.0 },
            "xrt_history": [
                { "type": "game_start", "turn": 0 },
                { "type": "elicit_response", "response": "a brisk summary" },
                { "type": "reward", "value": { "scale": 1, "pairs": [["the", 0.5], ["cat", -0.25]] } },
                { "type": "observation", "payload": { "nested": true } }
            ]
        })
    }

    #[test]
    fn round_parses_and_filters_history() {
        let round: RawRoundResult = serde_json::from_value(sample_round()).unwrap();
        assert_eq!(round.scores[SIDE_LABEL], 12.5);

        let rewards = round.reward_events();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].scale, 1.0);
        assert_eq!(rewards[0].pairs[1], ("cat".to_string(), -0.25));

        let elicits = round.elicit_responses();
        assert_eq!(elicits, ["a brisk summary"]);
    }

    #[test]
    fn unknown_event_types_are_tolerated() {
        let round: RawRoundResult = serde_json::from_value(serde_json::json!({
            "scores": { "black": 1.0 },
            "xrt_history": [
                { "type": "some_future_event", "anything": [1, 2, 3] }
            ]
        }))
        .unwrap();
        assert!(round.reward_events().is_empty());
        assert!(round.elicit_responses().is_empty());
    }

    #[test]
    fn log_exposes_identity_and_model() {
        let log: RawGameLog = serde_json::from_value(serde_json::json!({
            "game": {
                "game": { "name": "Condense", "map_seed": 42 },
                "players": [{ "id": "gpt-5" }]
            },
            "game_results": [sample_round()]
        }))
        .unwrap();
        assert_eq!(log.identity(), ("Condense", 42));
        assert_eq!(log.model_id(), Some("gpt-5"));
    }
}
