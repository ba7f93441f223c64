//! Deterministic event selection.
//!
//! Both entry points filter by the policy's magnitude floors first and then
//! order candidates with one strict total order, so the same input always
//! yields the same selection — no randomness, no reliance on iteration
//! order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{
    event::{Event, EventKind},
    policy::EventPolicy,
};

/// Total order over events under a policy, best first: score descending,
/// then `magnitude_raw` descending, earlier round, model id, kind name.
fn compare_events(policy: &EventPolicy, a: &Event, b: &Event) -> Ordering {
    policy
        .score_of(b)
        .total_cmp(&policy.score_of(a))
        .then_with(|| b.magnitude_raw.total_cmp(&a.magnitude_raw))
        .then_with(|| a.round.cmp(&b.round))
        .then_with(|| a.model_id.cmp(&b.model_id))
        .then_with(|| a.kind().as_str().cmp(b.kind().as_str()))
}

/// Select the single most interesting event, or `None` when nothing
/// survives the policy's floors.
#[must_use]
pub fn select_event<'a>(events: &'a [Event], policy: &EventPolicy) -> Option<&'a Event> {
    events
        .iter()
        .filter(|event| policy.admits(event))
        .min_by(|a, b| compare_events(policy, a, b))
}

/// Select up to `count` events maximizing diversity across models and
/// kinds, re-sorted by round for presentation.
///
/// Greedy: before each pick every remaining candidate is penalized
/// `-2 × picks-for-its-model - 1 × picks-for-its-kind`; the least-penalized
/// candidate wins (ties broken by the [`compare_events`] order). After a
/// pick, every candidate sharing both its model and kind is dropped from
/// the pool so the same story is never told twice about the same model.
#[must_use]
pub fn select_highlights(events: &[Event], count: usize, policy: &EventPolicy) -> Vec<Event> {
    let mut candidates: Vec<&Event> = events
        .iter()
        .filter(|event| policy.admits(event))
        .collect();
    let mut picked: Vec<&Event> = Vec::new();

    while picked.len() < count && !candidates.is_empty() {
        let mut model_counts: HashMap<&str, i64> = HashMap::new();
        let mut kind_counts: HashMap<EventKind, i64> = HashMap::new();
        for pick in &picked {
            *model_counts.entry(pick.model_id.as_str()).or_default() += 1;
            *kind_counts.entry(pick.kind()).or_default() += 1;
        }
        let penalty_of = |event: &Event| {
            -2 * model_counts.get(event.model_id.as_str()).copied().unwrap_or(0)
                - kind_counts.get(&event.kind()).copied().unwrap_or(0)
        };

        let Some(best) = candidates
            .iter()
            .copied()
            .min_by(|a, b| {
                penalty_of(b)
                    .cmp(&penalty_of(a))
                    .then_with(|| compare_events(policy, a, b))
            })
        else {
            break;
        };

        candidates.retain(|candidate| {
            candidate.model_id != best.model_id || candidate.kind() != best.kind()
        });
        picked.push(best);
    }

    picked.sort_by_key(|event| event.round);
    picked.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDetails;

    fn event(model: &str, round: usize, details: EventDetails, raw: f64, norm: f64) -> Event {
        Event {
            model_id: model.to_owned(),
            round,
            magnitude_raw: raw,
            magnitude_norm: norm,
            details,
        }
    }

    fn big_jump(model: &str, round: usize, delta: f64) -> Event {
        event(
            model,
            round,
            EventDetails::BigJump {
                delta,
                previous_score: 0.0,
                new_score: delta,
            },
            delta,
            delta,
        )
    }

    fn lead_change(model: &str, round: usize, margin: f64) -> Event {
        event(
            model,
            round,
            EventDetails::LeadChange {
                previous_leader_id: "prev".to_owned(),
                margin,
                leader_score: margin,
                runner_up_score: 0.0,
            },
            margin,
            margin,
        )
    }

    fn first_to_top(model: &str, round: usize, start_rank: usize, norm: f64) -> Event {
        #[expect(clippy::cast_precision_loss)]
        let raw = (start_rank - 1) as f64;
        event(
            model,
            round,
            EventDetails::FirstToTop { start_rank },
            raw,
            norm,
        )
    }

    #[test]
    fn select_event_prefers_the_weighted_score() {
        let events = vec![
            big_jump("a", 3, 5.0),
            first_to_top("b", 4, 2, 0.5),
        ];
        // first_to_top scores 20 × 0.5 = 10, big_jump scores 1 × 5 = 5.
        let best = select_event(&events, &EventPolicy::default()).unwrap();
        assert_eq!(best.model_id, "b");
    }

    #[test]
    fn select_event_filters_by_floor() {
        let events = vec![big_jump("a", 1, 0.5), lead_change("b", 2, 0.2)];
        assert_eq!(select_event(&events, &EventPolicy::default()), None);
    }

    #[test]
    fn select_event_tie_breaks_are_deterministic() {
        // Equal score and magnitude: earlier round wins.
        let events = vec![big_jump("a", 5, 3.0), big_jump("b", 2, 3.0)];
        let best = select_event(&events, &EventPolicy::default()).unwrap();
        assert_eq!(best.model_id, "b");

        // Same round too: lexicographically smaller model id wins.
        let events = vec![big_jump("z", 2, 3.0), big_jump("b", 2, 3.0)];
        let best = select_event(&events, &EventPolicy::default()).unwrap();
        assert_eq!(best.model_id, "b");
    }

    #[test]
    fn highlights_never_repeat_a_model_kind_pair() {
        let events = vec![
            big_jump("a", 1, 9.0),
            big_jump("a", 3, 8.0),
            big_jump("a", 5, 7.0),
            lead_change("a", 4, 2.0),
            big_jump("b", 2, 3.0),
        ];
        let highlights = select_highlights(&events, 3, &EventPolicy::default());
        assert_eq!(highlights.len(), 3);
        for (i, x) in highlights.iter().enumerate() {
            for y in &highlights[i + 1..] {
                assert!(
                    x.model_id != y.model_id || x.kind() != y.kind(),
                    "duplicate (model, kind) pair selected"
                );
            }
        }
        // Pool pruning removed a's other big jumps, so the survivors are
        // a's best jump, b's jump, and a's lead change.
        let models: Vec<_> = highlights
            .iter()
            .map(|h| (h.model_id.as_str(), h.kind()))
            .collect();
        assert!(models.contains(&("a", EventKind::BigJump)));
        assert!(models.contains(&("b", EventKind::BigJump)));
        assert!(models.contains(&("a", EventKind::LeadChange)));
    }

    #[test]
    fn highlights_are_sorted_by_round() {
        let events = vec![
            big_jump("a", 7, 9.0),
            big_jump("b", 2, 3.0),
            lead_change("c", 5, 2.0),
        ];
        let highlights = select_highlights(&events, 3, &EventPolicy::default());
        let rounds: Vec<_> = highlights.iter().map(|h| h.round).collect();
        assert_eq!(rounds, [2, 5, 7]);
    }

    #[test]
    fn highlights_stop_when_the_pool_runs_dry() {
        let events = vec![big_jump("a", 1, 5.0)];
        let highlights = select_highlights(&events, 3, &EventPolicy::default());
        assert_eq!(highlights.len(), 1);
    }

    #[test]
    fn diversity_penalty_beats_raw_score() {
        // Two strong events for model a, one weaker for b: the second pick
        // must go to b even though a's second event scores higher.
        let events = vec![
            big_jump("a", 1, 9.0),
            lead_change("a", 2, 8.0),
            lead_change("b", 3, 1.0),
        ];
        let highlights = select_highlights(&events, 2, &EventPolicy::default());
        let models: Vec<_> = highlights.iter().map(|h| h.model_id.as_str()).collect();
        assert!(models.contains(&"a"));
        assert!(models.contains(&"b"));
    }
}
