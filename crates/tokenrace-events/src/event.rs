//! Event value objects.

use std::fmt;

use serde::Serialize;

/// The closed set of detectable moment kinds.
///
/// Serialized names are stable and double as the lexicographic tie-break
/// key during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    FirstToTop,
    LeadChange,
    BigJump,
    MaxTokenPositive,
    MaxTokenNegative,
}

impl EventKind {
    /// Stable snake_case name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::FirstToTop => "first_to_top",
            EventKind::LeadChange => "lead_change",
            EventKind::BigJump => "big_jump",
            EventKind::MaxTokenPositive => "max_token_positive",
            EventKind::MaxTokenNegative => "max_token_negative",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind payload of an event.
///
/// A sum type rather than a generic map: each kind's fields are fixed
/// contract, and a formatter or consumer that misses a kind fails to
/// compile instead of silently describing the event generically.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDetails {
    #[serde(rename_all = "camelCase")]
    FirstToTop {
        /// 1-based rank the model held at round 0.
        start_rank: usize,
    },
    #[serde(rename_all = "camelCase")]
    LeadChange {
        previous_leader_id: String,
        /// Best-score gap between the new leader and the runner-up.
        margin: f64,
        leader_score: f64,
        runner_up_score: f64,
    },
    #[serde(rename_all = "camelCase")]
    BigJump {
        delta: f64,
        previous_score: f64,
        new_score: f64,
    },
    #[serde(rename_all = "camelCase")]
    MaxTokenPositive {
        token: String,
        previous_score: f64,
        current_score: f64,
        change: f64,
        seq_index: usize,
        token_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    MaxTokenNegative {
        token: String,
        previous_score: f64,
        current_score: f64,
        /// Signed change (negative).
        change: f64,
        abs_change: f64,
        seq_index: usize,
        token_index: usize,
    },
}

impl EventDetails {
    /// Kind of the event this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventDetails::FirstToTop { .. } => EventKind::FirstToTop,
            EventDetails::LeadChange { .. } => EventKind::LeadChange,
            EventDetails::BigJump { .. } => EventKind::BigJump,
            EventDetails::MaxTokenPositive { .. } => EventKind::MaxTokenPositive,
            EventDetails::MaxTokenNegative { .. } => EventKind::MaxTokenNegative,
        }
    }
}

/// A detected significant moment of the race.
///
/// Value object: produced fresh on each detection pass, never mutated, no
/// identity beyond its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub model_id: String,
    /// 0-based index into the augmented frame sequence.
    pub round: usize,
    /// Unnormalized significance; semantics depend on the kind.
    pub magnitude_raw: f64,
    /// Normalized significance used for cross-kind comparison.
    pub magnitude_norm: f64,
    pub details: EventDetails,
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.details.kind()
    }
}
