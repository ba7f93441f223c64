//! Race augmentation: running-best history and ranking over a canonical
//! dataset.
//!
//! This crate turns a [`tokenrace_dataset::Dataset`] into the per-round
//! snapshots a bar-race leaderboard animates:
//!
//! 1. **Augment** ([`race::RaceData::new`]): one pass over the rounds folds
//!    each model's best-so-far record (score, move, token attributions) and
//!    attaches presentation metadata ([`metadata`])
//! 2. **Query** ([`race::RaceData`]): frames, per-model histories,
//!    finalists, final ranks, and presentation projections, all O(rounds)
//!    reads over the precomputed structure
//! 3. **Rank** ([`rank`]): the one shared rank-by-best-score routine every
//!    consumer uses, so tie-breaks agree everywhere
//!
//! # Invariants
//!
//! - Every frame contains exactly the model set of round 0, in round-0
//!   order (guaranteed upstream by the normalizer and re-checked here with
//!   [`race::MissingModelError`])
//! - `best_score` per model is monotonically non-decreasing across rounds
//! - Score ties never advance `best_round_index` (earliest-best-wins)
//!
//! # Example
//!
//! ```
//! use tokenrace_dataset::{Dataset, RoundModel};
//! use tokenrace_race::race::RaceData;
//!
//! let dataset = Dataset {
//!     version: "0.1.0".to_owned(),
//!     rounds: vec![
//!         vec![RoundModel {
//!             model: "gpt-5".to_owned(),
//!             score: 1.0,
//!             move_text: "a start".to_owned(),
//!             token_scores: vec![],
//!         }],
//!         vec![RoundModel {
//!             model: "gpt-5".to_owned(),
//!             score: 3.0,
//!             move_text: "a better move".to_owned(),
//!             token_scores: vec![],
//!         }],
//!     ],
//! };
//! let race = RaceData::new(&dataset)?;
//! assert_eq!(race.rounds_len(), 2);
//! assert_eq!(race.item_at("gpt-5", 1).unwrap().best_score, 3.0);
//! # Ok::<(), tokenrace_race::race::MissingModelError>(())
//! ```

pub use self::race::{AugmentedRoundModel, Frame, FrameItem, MissingModelError, RaceData};

pub mod metadata;
pub mod race;
pub mod rank;
