//! Selection policy: per-kind weights and magnitude floors.

use crate::event::{Event, EventKind};

/// Weight and optional floor for one event kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindPolicy {
    /// Multiplier applied to `magnitude_norm` when scoring.
    pub weight: f64,
    /// Events whose `magnitude_raw` does not strictly exceed this are
    /// discarded; `None` admits every magnitude.
    pub min: Option<f64>,
}

/// Caller-supplied configuration pairing every event kind with its
/// selection weight and optional magnitude floor.
///
/// One field per kind keeps the pairing exhaustive: adding a kind without
/// deciding its policy is a compile error.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPolicy {
    pub first_to_top: KindPolicy,
    pub lead_change: KindPolicy,
    pub big_jump: KindPolicy,
    pub max_token_positive: KindPolicy,
    pub max_token_negative: KindPolicy,
}

impl EventPolicy {
    /// Policy entry for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: EventKind) -> KindPolicy {
        match kind {
            EventKind::FirstToTop => self.first_to_top,
            EventKind::LeadChange => self.lead_change,
            EventKind::BigJump => self.big_jump,
            EventKind::MaxTokenPositive => self.max_token_positive,
            EventKind::MaxTokenNegative => self.max_token_negative,
        }
    }

    /// Comparable score of an event under this policy.
    #[must_use]
    pub fn score_of(&self, event: &Event) -> f64 {
        self.for_kind(event.kind()).weight * event.magnitude_norm
    }

    /// Whether an event survives the kind's magnitude floor.
    #[must_use]
    pub fn admits(&self, event: &Event) -> bool {
        self.for_kind(event.kind())
            .min
            .is_none_or(|min| event.magnitude_raw > min)
    }
}

impl Default for EventPolicy {
    /// Tuned defaults: reaching the top dominates, token-level events only
    /// surface through diversity picks (zero weight), and small magnitudes
    /// are floored out per kind.
    fn default() -> Self {
        Self {
            first_to_top: KindPolicy {
                weight: 20.0,
                min: None,
            },
            lead_change: KindPolicy {
                weight: 1.0,
                min: Some(0.5),
            },
            big_jump: KindPolicy {
                weight: 1.0,
                min: Some(1.0),
            },
            max_token_positive: KindPolicy {
                weight: 0.0,
                min: Some(1.0),
            },
            max_token_negative: KindPolicy {
                weight: 0.0,
                min: Some(1.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDetails;

    fn big_jump(magnitude_raw: f64, magnitude_norm: f64) -> Event {
        Event {
            model_id: "m".to_owned(),
            round: 1,
            magnitude_raw,
            magnitude_norm,
            details: EventDetails::BigJump {
                delta: magnitude_raw,
                previous_score: 0.0,
                new_score: magnitude_raw,
            },
        }
    }

    #[test]
    fn score_multiplies_weight_and_norm() {
        let policy = EventPolicy::default();
        let event = big_jump(3.0, 2.0);
        assert_eq!(policy.score_of(&event), 2.0);
    }

    #[test]
    fn floor_is_strict() {
        let policy = EventPolicy::default();
        assert!(!policy.admits(&big_jump(1.0, 1.0)));
        assert!(policy.admits(&big_jump(1.1, 1.1)));
    }

    #[test]
    fn missing_floor_admits_everything() {
        let policy = EventPolicy::default();
        let event = Event {
            model_id: "m".to_owned(),
            round: 0,
            magnitude_raw: -4.0,
            magnitude_norm: -4.0,
            details: EventDetails::FirstToTop { start_rank: 2 },
        };
        assert!(policy.admits(&event));
    }
}
