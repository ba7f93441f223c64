//! Benchmark log normalization for the token-game leaderboard.
//!
//! Language models compete in daily token games: every model gets the same
//! game (identified by name and map seed) and plays a fixed number of rounds,
//! submitting one free-text move per round. The harness records, per round, a
//! score and an event history containing the submitted move plus one reward
//! event per reference text, each carrying per-token attributions.
//!
//! This crate turns those heterogeneous per-model game logs into one
//! canonical [`Dataset`]: an ordered sequence of rounds, each holding exactly
//! one [`RoundModel`] record per competing model.
//!
//! # Pipeline
//!
//! 1. Deserialize the raw export ([`raw`]): game identity, players, per-round
//!    scores and event histories
//! 2. Pick the game variant ([`variant::GameVariant`]): how many reward
//!    events a round must carry and with which scales
//! 3. Normalize ([`normalize::normalize_benchmark`]): validate and convert to
//!    the canonical [`Dataset`]
//!
//! # Validation
//!
//! Normalization is all-or-nothing: mixed game identities, wrong reward
//! counts or scales, duplicate models, uneven round counts, or a round
//! missing a model all abort with a [`normalize::ValidationError`] naming the
//! violated expectation. Consumers of the resulting [`Dataset`] may assume
//! every round carries the same model set.
//!
//! # Example
//!
//! ```no_run
//! use tokenrace_dataset::{normalize::normalize_benchmark, raw::RawGameLog, variant::GameVariant};
//!
//! let logs: Vec<RawGameLog> = vec![]; // deserialized from a benchmark export
//! let dataset = normalize_benchmark(&logs, GameVariant::Condense)?;
//! println!("{} rounds", dataset.rounds.len());
//! # Ok::<(), tokenrace_dataset::normalize::ValidationError>(())
//! ```

pub use self::dataset::{Dataset, RoundModel, TokenScores, TokenScoresList};

pub mod dataset;
pub mod normalize;
pub mod raw;
pub mod variant;
