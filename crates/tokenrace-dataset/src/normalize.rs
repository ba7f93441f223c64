//! Normalization of raw benchmark logs into the canonical [`Dataset`].
//!
//! One generic routine handles all variants: the variant contributes only an
//! expected-reward-shape descriptor (count + per-slot scales), the
//! per-round/per-model validation loop is shared.

use crate::{
    dataset::{DATASET_VERSION, Dataset, RoundModel},
    raw::{RawGameLog, SIDE_LABEL},
    variant::GameVariant,
};

/// A structural precondition of the raw input was violated.
///
/// Normalization is all-or-nothing; any of these aborts the attempt without
/// producing a partial dataset.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ValidationError {
    #[display("benchmark export contains no game logs")]
    EmptyBenchmark,
    #[display(
        "all logs must belong to one game: expected '{expected_name}' (seed {expected_seed}), \
         found '{found_name}' (seed {found_seed})"
    )]
    MixedGameIdentity {
        expected_name: String,
        expected_seed: u64,
        found_name: String,
        found_seed: u64,
    },
    #[display("game log #{index} records no player")]
    MissingPlayer { index: usize },
    #[display("duplicate log for model '{model}'")]
    DuplicateModel { model: String },
    #[display("model '{model}' has {actual} rounds, expected {expected}")]
    RoundCountMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },
    #[display(
        "{variant} expects exactly {expected} reward events, got {actual} \
         (model '{model}', round {round})"
    )]
    RewardCountMismatch {
        variant: GameVariant,
        expected: usize,
        actual: usize,
        model: String,
        round: usize,
    },
    #[display(
        "{variant} expects reward scale {expected} at position {position}, got {actual} \
         (model '{model}', round {round})"
    )]
    RewardScaleMismatch {
        variant: GameVariant,
        position: usize,
        expected: f64,
        actual: f64,
        model: String,
        round: usize,
    },
    #[display("expected exactly 1 elicit event, got {actual} (model '{model}', round {round})")]
    ElicitCountMismatch {
        actual: usize,
        model: String,
        round: usize,
    },
    #[display("round {round} for model '{model}' has no '{side}' score")]
    MissingSideScore {
        side: String,
        model: String,
        round: usize,
    },
    #[display("score {score} for model '{model}' in round {round} is not finite")]
    NonFiniteScore {
        score: f64,
        model: String,
        round: usize,
    },
    #[display("round {round} has no entry for model '{model}'")]
    MissingModelInRound { round: usize, model: String },
    #[display("round {round} has {actual} entries, expected {expected}")]
    RoundSizeMismatch {
        round: usize,
        expected: usize,
        actual: usize,
    },
}

/// Verify that every log belongs to the same game instance.
///
/// Guards against accidentally mixing logs exported from different games or
/// different seeds of the same game.
pub fn ensure_single_game(logs: &[RawGameLog]) -> Result<(), ValidationError> {
    let first = logs.first().ok_or(ValidationError::EmptyBenchmark)?;
    let (expected_name, expected_seed) = first.identity();
    for log in logs {
        let (name, seed) = log.identity();
        if name != expected_name || seed != expected_seed {
            return Err(ValidationError::MixedGameIdentity {
                expected_name: expected_name.to_owned(),
                expected_seed,
                found_name: name.to_owned(),
                found_seed: seed,
            });
        }
    }
    Ok(())
}

/// Normalize raw per-model game logs into the canonical [`Dataset`].
///
/// Validates the shared game identity, the per-round reward shape required
/// by `variant`, and finally the dataset invariant that every round carries
/// exactly one entry per model. The per-round model order of the output is
/// the log order of the input, identical in every round.
pub fn normalize_benchmark(
    logs: &[RawGameLog],
    variant: GameVariant,
) -> Result<Dataset, ValidationError> {
    ensure_single_game(logs)?;

    let n_rounds = logs[0].game_results.len();

    let mut models = Vec::with_capacity(logs.len());
    for (index, log) in logs.iter().enumerate() {
        let model = log
            .model_id()
            .ok_or(ValidationError::MissingPlayer { index })?;
        if models.contains(&model) {
            return Err(ValidationError::DuplicateModel {
                model: model.to_owned(),
            });
        }
        if log.game_results.len() != n_rounds {
            return Err(ValidationError::RoundCountMismatch {
                model: model.to_owned(),
                expected: n_rounds,
                actual: log.game_results.len(),
            });
        }
        models.push(model);
    }

    let mut rounds: Vec<Vec<RoundModel>> = vec![Vec::new(); n_rounds];
    for (log, model) in logs.iter().zip(&models) {
        for (round_index, raw_round) in log.game_results.iter().enumerate() {
            let record = convert_round(variant, model, round_index, raw_round)?;
            rounds[round_index].push(record);
        }
    }

    // Postcondition consumed by the race layer: every round contains every
    // model, and nothing else.
    for (round_index, round) in rounds.iter().enumerate() {
        for model in &models {
            if !round.iter().any(|r| r.model == *model) {
                return Err(ValidationError::MissingModelInRound {
                    round: round_index,
                    model: (*model).to_owned(),
                });
            }
        }
        if round.len() != models.len() {
            return Err(ValidationError::RoundSizeMismatch {
                round: round_index,
                expected: models.len(),
                actual: round.len(),
            });
        }
    }

    Ok(Dataset {
        version: DATASET_VERSION.to_owned(),
        rounds,
    })
}

/// Convert one raw round result into a [`RoundModel`], validating the
/// variant's reward shape.
fn convert_round(
    variant: GameVariant,
    model: &str,
    round: usize,
    raw: &crate::raw::RawRoundResult,
) -> Result<RoundModel, ValidationError> {
    let rewards = raw.reward_events();
    let expected_scales = variant.expected_scales();
    if rewards.len() != expected_scales.len() {
        return Err(ValidationError::RewardCountMismatch {
            variant,
            expected: expected_scales.len(),
            actual: rewards.len(),
            model: model.to_owned(),
            round,
        });
    }
    for (position, (reward, &expected)) in rewards.iter().zip(expected_scales).enumerate() {
        if reward.scale != expected {
            return Err(ValidationError::RewardScaleMismatch {
                variant,
                position,
                expected,
                actual: reward.scale,
                model: model.to_owned(),
                round,
            });
        }
    }

    let elicits = raw.elicit_responses();
    if elicits.len() != 1 {
        return Err(ValidationError::ElicitCountMismatch {
            actual: elicits.len(),
            model: model.to_owned(),
            round,
        });
    }

    let score = raw.scores.get(SIDE_LABEL).copied().ok_or_else(|| {
        ValidationError::MissingSideScore {
            side: SIDE_LABEL.to_owned(),
            model: model.to_owned(),
            round,
        }
    })?;
    if !score.is_finite() {
        return Err(ValidationError::NonFiniteScore {
            score,
            model: model.to_owned(),
            round,
        });
    }

    Ok(RoundModel {
        model: model.to_owned(),
        score,
        move_text: elicits[0].to_owned(),
        token_scores: rewards.iter().map(|r| r.pairs.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(scale: f64, pairs: &[(&str, f64)]) -> serde_json::Value {
        let pairs: Vec<_> = pairs.iter().map(|(t, s)| serde_json::json!([t, s])).collect();
        serde_json::json!({ "type": "reward", "value": { "scale": scale, "pairs": pairs } })
    }

    fn round(score: f64, move_text: &str, rewards: Vec<serde_json::Value>) -> serde_json::Value {
        let mut history = vec![serde_json::json!({
            "type": "elicit_response",
            "response": move_text
        })];
        history.extend(rewards);
        serde_json::json!({ "scores": { "black": score }, "xrt_history": history })
    }

    fn condense_round(score: f64, move_text: &str) -> serde_json::Value {
        round(
            score,
            move_text,
            vec![reward(1.0, &[("sun", 0.4), ("rise", -0.1)])],
        )
    }

    fn log(model: &str, seed: u64, rounds: Vec<serde_json::Value>) -> RawGameLog {
        serde_json::from_value(serde_json::json!({
            "game": {
                "game": { "name": "Condense", "map_seed": seed },
                "players": [{ "id": model }]
            },
            "game_results": rounds
        }))
        .unwrap()
    }

    #[test]
    fn condense_round_trip() {
        let logs = vec![
            log(
                "gpt-5",
                7,
                vec![
                    condense_round(1.0, "first"),
                    condense_round(3.0, "second"),
                    condense_round(2.0, "third"),
                ],
            ),
            log(
                "claude-opus-4-1-20250805",
                7,
                vec![
                    condense_round(2.0, "uno"),
                    condense_round(2.5, "dos"),
                    condense_round(4.0, "tres"),
                ],
            ),
        ];
        let dataset = normalize_benchmark(&logs, GameVariant::Condense).unwrap();
        assert_eq!(dataset.version, DATASET_VERSION);
        assert_eq!(dataset.rounds_len(), 3);
        assert_eq!(dataset.model_ids(), ["gpt-5", "claude-opus-4-1-20250805"]);

        let second = &dataset.rounds[1][0];
        assert_eq!(second.model, "gpt-5");
        assert_eq!(second.score, 3.0);
        assert_eq!(second.move_text, "second");
        assert_eq!(second.token_scores.len(), 1);
        assert_eq!(second.token_scores[0][0], ("sun".to_string(), 0.4));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            normalize_benchmark(&[], GameVariant::Condense),
            Err(ValidationError::EmptyBenchmark)
        );
    }

    #[test]
    fn mixed_seeds_are_rejected() {
        let logs = vec![
            log("a", 1, vec![condense_round(1.0, "m")]),
            log("b", 2, vec![condense_round(1.0, "m")]),
        ];
        let err = normalize_benchmark(&logs, GameVariant::Condense).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MixedGameIdentity {
                expected_name: "Condense".to_owned(),
                expected_seed: 1,
                found_name: "Condense".to_owned(),
                found_seed: 2,
            }
        );
    }

    #[test]
    fn duplicate_model_is_rejected() {
        let logs = vec![
            log("a", 1, vec![condense_round(1.0, "m")]),
            log("a", 1, vec![condense_round(2.0, "n")]),
        ];
        assert!(matches!(
            normalize_benchmark(&logs, GameVariant::Condense),
            Err(ValidationError::DuplicateModel { model }) if model == "a"
        ));
    }

    #[test]
    fn uneven_round_counts_are_rejected() {
        let logs = vec![
            log("a", 1, vec![condense_round(1.0, "m"), condense_round(2.0, "n")]),
            log("b", 1, vec![condense_round(1.0, "m")]),
        ];
        assert!(matches!(
            normalize_benchmark(&logs, GameVariant::Condense),
            Err(ValidationError::RoundCountMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn contrast_requires_negative_second_scale() {
        let bad = round(
            1.0,
            "m",
            vec![reward(1.0, &[("x", 0.1)]), reward(1.0, &[("y", 0.2)])],
        );
        let logs = vec![log("a", 1, vec![bad])];
        let err = normalize_benchmark(&logs, GameVariant::Contrast).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RewardScaleMismatch {
                variant: GameVariant::Contrast,
                position: 1,
                expected: -1.0,
                actual: 1.0,
                model: "a".to_owned(),
                round: 0,
            }
        );
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn contrast_accepts_expected_scales() {
        let good = round(
            1.5,
            "m",
            vec![reward(1.0, &[("x", 0.1)]), reward(-1.0, &[("y", -0.2)])],
        );
        let dataset =
            normalize_benchmark(&[log("a", 1, vec![good])], GameVariant::Contrast).unwrap();
        assert_eq!(dataset.rounds[0][0].token_scores.len(), 2);
    }

    #[test]
    fn synthesize_requires_three_rewards() {
        let short = round(
            1.0,
            "m",
            vec![reward(1.0, &[("x", 0.1)]), reward(1.0, &[("y", 0.2)])],
        );
        assert!(matches!(
            normalize_benchmark(&[log("a", 1, vec![short])], GameVariant::Synthesize),
            Err(ValidationError::RewardCountMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn missing_elicit_is_rejected() {
        let no_move = serde_json::json!({
            "scores": { "black": 1.0 },
            "xrt_history": [reward(1.0, &[("x", 0.1)])]
        });
        let logs = vec![log("a", 1, vec![no_move])];
        assert!(matches!(
            normalize_benchmark(&logs, GameVariant::Condense),
            Err(ValidationError::ElicitCountMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn missing_side_score_is_rejected() {
        let no_score = serde_json::json!({
            "scores": { "white": 1.0 },
            "xrt_history": [
                { "type": "elicit_response", "response": "m" },
                reward(1.0, &[("x", 0.1)])
            ]
        });
        let logs = vec![log("a", 1, vec![no_score])];
        assert!(matches!(
            normalize_benchmark(&logs, GameVariant::Condense),
            Err(ValidationError::MissingSideScore { side, round: 0, .. }) if side == "black"
        ));
    }
}
