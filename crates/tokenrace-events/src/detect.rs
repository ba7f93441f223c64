//! Detectors scanning the augmented frame sequence for notable moments.
//!
//! Each detector is a pure function from the full frame sequence to the
//! events of its own kind; the catalogue is the union of their outputs.
//! Detectors never fail on degenerate input (no rounds, one model), they
//! simply emit nothing for conditions that don't apply.

use std::collections::HashSet;

use tokenrace_dataset::TokenScoresList;
use tokenrace_race::{RaceData, rank::rank_by_best_score};

use crate::event::{Event, EventDetails};

/// Run every detector and collect the union of their events.
#[must_use]
pub fn compute_events(race: &RaceData) -> Vec<Event> {
    let mut events = detect_first_to_top(race);
    events.extend(detect_lead_changes(race));
    events.extend(detect_big_jumps(race));
    events.extend(detect_max_token_positive(race));
    events.extend(detect_max_token_negative(race));
    events
}

/// Detect each model's first time at the top of the leaderboard.
///
/// Only models that were not already leading at round 0 qualify; the
/// magnitude is the number of positions climbed since round 0. Each model
/// triggers at most once.
#[must_use]
pub fn detect_first_to_top(race: &RaceData) -> Vec<Event> {
    let mut events = Vec::new();
    let Some(start_frame) = race.frames().first() else {
        return events;
    };
    let model_count = race.models().len();

    let start_order = rank_by_best_score(start_frame);
    let start_rank_of = |model: &str| {
        start_order
            .iter()
            .position(|entry| entry.model == model)
            .map_or(1, |index| index + 1)
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for (round, frame) in race.frames().iter().enumerate() {
        let ranked = rank_by_best_score(frame);
        let Some(leader) = ranked.first() else {
            continue;
        };
        if seen.contains(leader.model.as_str()) {
            continue;
        }
        let start_rank = start_rank_of(&leader.model);
        if start_rank > 1 {
            #[expect(clippy::cast_precision_loss)]
            let magnitude_raw = (start_rank - 1) as f64;
            #[expect(clippy::cast_precision_loss)]
            let magnitude_norm = magnitude_raw / (model_count.saturating_sub(1).max(1)) as f64;
            events.push(Event {
                model_id: leader.model.clone(),
                round,
                magnitude_raw,
                magnitude_norm,
                details: EventDetails::FirstToTop { start_rank },
            });
        }
        seen.insert(leader.model.as_str());
    }
    events
}

/// Detect rounds where the leadership changes hands.
///
/// The magnitude is the best-score margin between the new leader and the
/// runner-up. Rounds with fewer than two models are skipped.
#[must_use]
pub fn detect_lead_changes(race: &RaceData) -> Vec<Event> {
    let mut events = Vec::new();

    let mut prev_leader: Option<String> = None;
    for (round, frame) in race.frames().iter().enumerate() {
        let ranked = rank_by_best_score(frame);
        let [leader, runner_up, ..] = ranked.as_slice() else {
            continue;
        };

        if let Some(prev) = &prev_leader
            && *prev != leader.model
        {
            let margin = leader.best_score - runner_up.best_score;
            events.push(Event {
                model_id: leader.model.clone(),
                round,
                magnitude_raw: margin,
                magnitude_norm: margin,
                details: EventDetails::LeadChange {
                    previous_leader_id: prev.clone(),
                    margin,
                    leader_score: leader.best_score,
                    runner_up_score: runner_up.best_score,
                },
            });
        }
        prev_leader = Some(leader.model.clone());
    }
    events
}

/// Detect each model's single biggest best-score improvement.
///
/// At most one event per model: the round with the largest positive
/// consecutive-round increase, skipped entirely when no increase exists.
/// The normalized magnitude dampens early-round jumps by
/// `delta × round / (round + 2)`.
#[must_use]
pub fn detect_big_jumps(race: &RaceData) -> Vec<Event> {
    let mut events = Vec::new();

    for model in race.models() {
        let Some(rounds) = race.rounds_for(model) else {
            continue;
        };
        let Some(first) = rounds.first() else {
            continue;
        };

        let mut best_delta = f64::NEG_INFINITY;
        let mut best_round = 0;
        let mut prev = first.best_score;
        for (round, entry) in rounds.iter().enumerate().skip(1) {
            let delta = entry.best_score - prev;
            if delta > best_delta {
                best_delta = delta;
                best_round = round;
            }
            prev = entry.best_score;
        }

        if best_delta > 0.0 {
            #[expect(clippy::cast_precision_loss)]
            let round_f = best_round as f64;
            events.push(Event {
                model_id: model.clone(),
                round: best_round,
                magnitude_raw: best_delta,
                magnitude_norm: best_delta * round_f / (round_f + 2.0),
                details: EventDetails::BigJump {
                    delta: best_delta,
                    previous_score: rounds[best_round - 1].best_score,
                    new_score: rounds[best_round].best_score,
                },
            });
        }
    }
    events
}

/// Detect, per (model, round), the largest positive per-token score change
/// between consecutive rounds' best attributions.
#[must_use]
pub fn detect_max_token_positive(race: &RaceData) -> Vec<Event> {
    detect_token_extremes(race, Direction::Positive)
}

/// Detect, per (model, round), the largest negative per-token score change
/// between consecutive rounds' best attributions. The magnitude reports the
/// absolute value of the drop.
#[must_use]
pub fn detect_max_token_negative(race: &RaceData) -> Vec<Event> {
    detect_token_extremes(race, Direction::Negative)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Positive,
    Negative,
}

fn detect_token_extremes(race: &RaceData, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();

    for round in 1..race.rounds_len() {
        for model in race.models() {
            let (Some(prev), Some(curr)) =
                (race.item_at(model, round - 1), race.item_at(model, round))
            else {
                continue;
            };
            let Some(change) =
                max_token_change(&prev.best_token_scores, &curr.best_token_scores, direction)
            else {
                continue;
            };

            let event = match direction {
                Direction::Positive => Event {
                    model_id: model.clone(),
                    round,
                    magnitude_raw: change.change,
                    magnitude_norm: change.change,
                    details: EventDetails::MaxTokenPositive {
                        token: change.token,
                        previous_score: change.prev_score,
                        current_score: change.curr_score,
                        change: change.change,
                        seq_index: change.seq_index,
                        token_index: change.token_index,
                    },
                },
                Direction::Negative => {
                    let abs_change = change.change.abs();
                    Event {
                        model_id: model.clone(),
                        round,
                        magnitude_raw: abs_change,
                        magnitude_norm: abs_change,
                        details: EventDetails::MaxTokenNegative {
                            token: change.token,
                            previous_score: change.prev_score,
                            current_score: change.curr_score,
                            change: change.change,
                            abs_change,
                            seq_index: change.seq_index,
                            token_index: change.token_index,
                        },
                    }
                }
            };
            events.push(event);
        }
    }
    events
}

#[derive(Debug, Clone)]
struct TokenChange {
    token: String,
    change: f64,
    prev_score: f64,
    curr_score: f64,
    seq_index: usize,
    token_index: usize,
}

/// Find the extreme per-token score change between two attribution lists.
///
/// Tokens are compared only where both the sequence position and the token
/// text line up; anything misaligned is skipped, not compared. Returns
/// `None` when no change exists in the requested direction.
fn max_token_change(
    prev: &TokenScoresList,
    curr: &TokenScoresList,
    direction: Direction,
) -> Option<TokenChange> {
    let mut best: Option<TokenChange> = None;

    for (seq_index, (prev_seq, curr_seq)) in prev.iter().zip(curr).enumerate() {
        for (token_index, ((prev_token, prev_score), (curr_token, curr_score))) in
            prev_seq.iter().zip(curr_seq).enumerate()
        {
            if prev_token != curr_token {
                continue;
            }
            let change = curr_score - prev_score;
            let better = match (&best, direction) {
                (None, _) => true,
                (Some(b), Direction::Positive) => change > b.change,
                (Some(b), Direction::Negative) => change < b.change,
            };
            if better {
                best = Some(TokenChange {
                    token: curr_token.clone(),
                    change,
                    prev_score: *prev_score,
                    curr_score: *curr_score,
                    seq_index,
                    token_index,
                });
            }
        }
    }

    best.filter(|b| match direction {
        Direction::Positive => b.change > 0.0,
        Direction::Negative => b.change < 0.0,
    })
}

#[cfg(test)]
mod tests {
    use tokenrace_dataset::{Dataset, RoundModel, TokenScores};
    use tokenrace_race::RaceData;

    use super::*;
    use crate::event::EventKind;

    fn record(model: &str, score: f64) -> RoundModel {
        RoundModel {
            model: model.to_owned(),
            score,
            move_text: format!("{model}-{score}"),
            token_scores: vec![],
        }
    }

    fn record_with_tokens(model: &str, score: f64, tokens: &[(&str, f64)]) -> RoundModel {
        let seq: TokenScores = tokens.iter().map(|(t, s)| ((*t).to_owned(), *s)).collect();
        RoundModel {
            token_scores: vec![seq],
            ..record(model, score)
        }
    }

    fn race_of(rounds: Vec<Vec<RoundModel>>) -> RaceData {
        RaceData::new(&Dataset {
            version: "0.1.0".to_owned(),
            rounds,
        })
        .unwrap()
    }

    /// a leads rounds 0-4, b (starting 3rd) takes over at round 5.
    fn takeover_race() -> RaceData {
        let mut rounds: Vec<Vec<RoundModel>> = (0..5)
            .map(|_| {
                vec![
                    record("a", 10.0),
                    record("c", 5.0),
                    record("b", 1.0),
                ]
            })
            .collect();
        rounds.push(vec![
            record("a", 10.0),
            record("c", 5.0),
            record("b", 12.0),
        ]);
        race_of(rounds)
    }

    #[test]
    fn first_to_top_emits_once_for_the_climber() {
        let events = detect_first_to_top(&takeover_race());
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind(), EventKind::FirstToTop);
        assert_eq!(event.model_id, "b");
        assert_eq!(event.round, 5);
        assert_eq!(event.magnitude_raw, 2.0);
        assert_eq!(event.magnitude_norm, 1.0);
        assert_eq!(event.details, EventDetails::FirstToTop { start_rank: 3 });
    }

    #[test]
    fn first_to_top_never_fires_for_the_round_zero_leader() {
        let race = race_of(vec![
            vec![record("a", 5.0), record("b", 1.0)],
            vec![record("a", 6.0), record("b", 2.0)],
        ]);
        assert!(detect_first_to_top(&race).is_empty());
    }

    #[test]
    fn lead_change_reports_margin_and_previous_leader() {
        let events = detect_lead_changes(&takeover_race());
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.model_id, "b");
        assert_eq!(event.round, 5);
        assert_eq!(event.magnitude_raw, 2.0);
        assert_eq!(
            event.details,
            EventDetails::LeadChange {
                previous_leader_id: "a".to_owned(),
                margin: 2.0,
                leader_score: 12.0,
                runner_up_score: 10.0,
            }
        );
    }

    #[test]
    fn lead_change_needs_two_models() {
        let race = race_of(vec![vec![record("solo", 1.0)], vec![record("solo", 9.0)]]);
        assert!(detect_lead_changes(&race).is_empty());
    }

    #[test]
    fn big_jump_picks_the_single_largest_increase() {
        let race = race_of(vec![
            vec![record("a", 1.0)],
            vec![record("a", 2.0)],
            vec![record("a", 10.0)],
            vec![record("a", 9.0)],
        ]);
        let events = detect_big_jumps(&race);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.round, 2);
        assert_eq!(event.magnitude_raw, 8.0);
        assert_eq!(event.magnitude_norm, 8.0 * 2.0 / 4.0);
        assert_eq!(
            event.details,
            EventDetails::BigJump {
                delta: 8.0,
                previous_score: 2.0,
                new_score: 10.0,
            }
        );
    }

    #[test]
    fn big_jump_skips_models_that_never_improve() {
        let race = race_of(vec![
            vec![record("flat", 3.0), record("up", 1.0)],
            vec![record("flat", 3.0), record("up", 2.0)],
        ]);
        let events = detect_big_jumps(&race);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].model_id, "up");
    }

    #[test]
    fn token_detectors_track_aligned_tokens_only() {
        let race = race_of(vec![
            vec![record_with_tokens(
                "a",
                1.0,
                &[("sun", 0.1), ("rise", -0.4), ("sky", 0.0)],
            )],
            vec![record_with_tokens(
                "a",
                2.0,
                &[("sun", 0.9), ("set", 0.5), ("sky", -0.3)],
            )],
        ]);

        let positive = detect_max_token_positive(&race);
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].round, 1);
        assert_eq!(positive[0].magnitude_raw, 0.8);
        assert_eq!(
            positive[0].details,
            EventDetails::MaxTokenPositive {
                token: "sun".to_owned(),
                previous_score: 0.1,
                current_score: 0.9,
                change: 0.8,
                seq_index: 0,
                token_index: 0,
            }
        );

        // "rise" vs "set" is misaligned text and must be ignored; the only
        // negative delta is "sky".
        let negative = detect_max_token_negative(&race);
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].magnitude_raw, 0.3);
        assert_eq!(
            negative[0].details,
            EventDetails::MaxTokenNegative {
                token: "sky".to_owned(),
                previous_score: 0.0,
                current_score: -0.3,
                change: -0.3,
                abs_change: 0.3,
                seq_index: 0,
                token_index: 2,
            }
        );
    }

    #[test]
    fn token_detectors_skip_unchanged_attributions() {
        let race = race_of(vec![
            vec![record_with_tokens("a", 1.0, &[("x", 0.5)])],
            vec![record_with_tokens("a", 0.5, &[("x", 0.5)])],
        ]);
        // Round 1 scored lower, so best tokens stay those of round 0.
        assert!(detect_max_token_positive(&race).is_empty());
        assert!(detect_max_token_negative(&race).is_empty());
    }

    #[test]
    fn detectors_tolerate_degenerate_input() {
        let empty = race_of(vec![]);
        assert!(compute_events(&empty).is_empty());

        let single = race_of(vec![vec![record("only", 1.0)]]);
        assert!(compute_events(&single).is_empty());
    }
}
