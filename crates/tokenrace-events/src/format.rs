//! Human-readable highlight lines.

use tokenrace_race::metadata::nice_model_name;

use crate::event::{Event, EventDetails};

/// One-line description of a highlight event.
///
/// The match is exhaustive over the details payload: a new event kind
/// without a sentence here is a compile error, never a generic fallback.
#[must_use]
pub fn format_highlight(event: &Event) -> String {
    let model = nice_model_name(&event.model_id);
    match &event.details {
        EventDetails::FirstToTop { start_rank } => {
            format!("{model} reached #1, climbing {} places.", start_rank - 1)
        }
        EventDetails::BigJump { delta, .. } => {
            format!("{model} gained {delta:.1} points in one round.")
        }
        EventDetails::LeadChange {
            previous_leader_id, ..
        } => {
            format!(
                "{model} took the lead from {}.",
                nice_model_name(previous_leader_id)
            )
        }
        EventDetails::MaxTokenPositive { .. } => {
            format!("A single token change gave {model} a big boost.")
        }
        EventDetails::MaxTokenNegative { .. } => {
            format!("A single token change cost {model} a lot.")
        }
    }
}
