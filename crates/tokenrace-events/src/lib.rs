//! Event detection and narrative selection over a race history.
//!
//! A race rendered as a bar chart animation is just data; the moments worth
//! narrating — a model storming to the top, a lead changing hands, a sudden
//! score jump, a single token swinging hard — need to be found, scored, and
//! picked. This crate does that in three read-only stages over an already
//! built [`tokenrace_race::RaceData`]:
//!
//! 1. **Detect** ([`detect`]): five independent detectors each scan the
//!    frame sequence and emit typed [`event::Event`] values; the catalogue
//!    is the union of their outputs
//! 2. **Score** ([`policy::EventPolicy`]): a caller-supplied (or default)
//!    policy maps each event to `weight × magnitude_norm` and floors out
//!    small magnitudes per kind
//! 3. **Select** ([`select`]): [`select::select_event`] picks the single
//!    best event under a strict total order; [`select::select_highlights`]
//!    greedily picks a diverse top-K across models and kinds
//!
//! Everything is deterministic: same race, same policy, same output.
//! Detectors tolerate degenerate input (no rounds, a single model) by
//! emitting nothing.
//!
//! # Example
//!
//! ```no_run
//! use tokenrace_events::{detect::compute_events, format::format_highlight,
//!     policy::EventPolicy, select::select_highlights};
//! # let race: tokenrace_race::RaceData = todo!();
//!
//! let events = compute_events(&race);
//! for highlight in select_highlights(&events, 3, &EventPolicy::default()) {
//!     println!("round {}: {}", highlight.round + 1, format_highlight(&highlight));
//! }
//! ```

pub use self::{
    event::{Event, EventDetails, EventKind},
    policy::{EventPolicy, KindPolicy},
};

pub mod detect;
pub mod event;
pub mod format;
pub mod policy;
pub mod select;
