//! Running-best race history derived from a canonical dataset.
//!
//! [`RaceData`] is built once, eagerly, from a [`Dataset`]: a single
//! left-to-right pass folds each model's best-so-far record across rounds
//! and attaches presentation metadata. Everything after construction is a
//! read-only query; the structure owns its frames exclusively and never
//! mutates them.

use tokenrace_dataset::{Dataset, TokenScoresList};

use crate::metadata::{self, Company};

/// One model's augmented record for one round: the raw round fields plus the
/// best-so-far fields and presentation attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRoundModel {
    pub model: String,
    /// Raw score of this round.
    pub score: f64,
    /// Move submitted this round.
    pub move_text: String,
    /// Token attributions of this round.
    pub token_scores: TokenScoresList,
    /// Round (≤ current) where the running-best score was achieved.
    pub best_round_index: usize,
    pub best_score: f64,
    pub best_move: String,
    pub best_token_scores: TokenScoresList,
    pub nice_model: String,
    pub company: Company,
    pub color: &'static str,
    pub logo_src: Option<&'static str>,
}

/// One round's augmented entries, ordered like [`RaceData::models`].
pub type Frame = Vec<AugmentedRoundModel>;

/// A model expected from round 0 was absent from a later round.
///
/// The normalizer's postcondition rules this out for datasets it produced;
/// hitting it means the dataset was constructed or modified elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("model '{model}' missing from round {round}")]
pub struct MissingModelError {
    pub model: String,
    pub round: usize,
}

/// Presentation projection of one frame entry, selected by
/// [`RaceData::build_frames`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FrameItem {
    pub model: String,
    pub nice_model: String,
    pub company: Company,
    pub color: &'static str,
    pub logo: Option<&'static str>,
    pub score: f64,
    #[serde(rename = "move")]
    pub move_text: String,
    pub token_scores: TokenScoresList,
}

/// Augmented race history with read-only query operations.
#[derive(Debug, Clone)]
pub struct RaceData {
    /// Model ids in round-0 order; every frame is ordered the same way.
    models: Vec<String>,
    frames: Vec<Frame>,
    max_abs_score: f64,
}

/// Running-best accumulator for one model.
#[derive(Debug, Clone)]
struct BestSoFar {
    round_index: usize,
    score: f64,
    move_text: String,
    token_scores: TokenScoresList,
}

impl BestSoFar {
    fn capture(round_index: usize, record: &tokenrace_dataset::RoundModel) -> Self {
        Self {
            round_index,
            score: record.score,
            move_text: record.move_text.clone(),
            token_scores: record.token_scores.clone(),
        }
    }
}

impl RaceData {
    /// Build the augmented frame sequence from a dataset in one pass.
    ///
    /// A strictly greater score advances a model's best record; ties keep
    /// the earlier round (earliest-best-wins). Round 0 seeds each model's
    /// best with its own record.
    pub fn new(dataset: &Dataset) -> Result<Self, MissingModelError> {
        let models: Vec<String> = dataset
            .model_ids()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect();
        let presentations: Vec<_> = models
            .iter()
            .map(|model| metadata::presentation(model))
            .collect();

        let mut best: Vec<BestSoFar> = Vec::with_capacity(models.len());
        let mut frames = Vec::with_capacity(dataset.rounds.len());
        for (round_index, round) in dataset.rounds.iter().enumerate() {
            let mut frame = Vec::with_capacity(models.len());
            for (model_index, model) in models.iter().enumerate() {
                let current = round
                    .iter()
                    .find(|record| record.model == *model)
                    .ok_or_else(|| MissingModelError {
                        model: model.clone(),
                        round: round_index,
                    })?;

                if round_index == 0 {
                    best.push(BestSoFar::capture(round_index, current));
                } else if current.score > best[model_index].score {
                    best[model_index] = BestSoFar::capture(round_index, current);
                }

                let b = &best[model_index];
                let presentation = &presentations[model_index];
                frame.push(AugmentedRoundModel {
                    model: model.clone(),
                    score: current.score,
                    move_text: current.move_text.clone(),
                    token_scores: current.token_scores.clone(),
                    best_round_index: b.round_index,
                    best_score: b.score,
                    best_move: b.move_text.clone(),
                    best_token_scores: b.token_scores.clone(),
                    nice_model: presentation.nice_model.clone(),
                    company: presentation.company,
                    color: presentation.color,
                    logo_src: presentation.logo_src,
                });
            }
            frames.push(frame);
        }

        let max_abs_score = dataset
            .rounds
            .iter()
            .flatten()
            .flat_map(|record| record.token_scores.iter().flatten())
            .map(|(_, score)| score.abs())
            .fold(0.0_f64, f64::max);

        Ok(Self {
            models,
            frames,
            max_abs_score,
        })
    }

    /// Number of frames (= rounds).
    #[must_use]
    pub fn rounds_len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Model ids in round-0 order.
    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// The augmented frame sequence, one frame per round.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Largest absolute token score anywhere in the dataset; `0.0` when the
    /// dataset carries no token scores. Normalizes downstream color scales.
    #[must_use]
    pub fn max_abs_score(&self) -> f64 {
        self.max_abs_score
    }

    /// Augmented record for `model` at `round`, or `None` when either is
    /// unknown.
    #[must_use]
    pub fn item_at(&self, model: &str, round: usize) -> Option<&AugmentedRoundModel> {
        let index = self.model_index(model)?;
        self.frames.get(round).map(|frame| &frame[index])
    }

    /// All of `model`'s augmented records across rounds, in round order.
    #[must_use]
    pub fn rounds_for(&self, model: &str) -> Option<Vec<&AugmentedRoundModel>> {
        let index = self.model_index(model)?;
        Some(self.frames.iter().map(|frame| &frame[index]).collect())
    }

    /// Raw (non-best) scores of `model` across rounds.
    #[must_use]
    pub fn history_for(&self, model: &str) -> Option<Vec<f64>> {
        let index = self.model_index(model)?;
        Some(self.frames.iter().map(|frame| frame[index].score).collect())
    }

    /// The top-two model ids by `best_score` in the last frame, ties broken
    /// by frame order. `None` with fewer than two models or no rounds.
    #[must_use]
    pub fn finalists(&self) -> Option<(&str, &str)> {
        let last = self.frames.last()?;
        let ranked = crate::rank::rank_by_best_score(last);
        match ranked.as_slice() {
            [first, second, ..] => Some((first.model.as_str(), second.model.as_str())),
            _ => None,
        }
    }

    /// 1-based final rank of `model` by `best_score` in the last frame.
    ///
    /// Unknown models rank last (the total model count), so callers always
    /// get a usable position.
    #[must_use]
    pub fn final_rank_for(&self, model: &str) -> usize {
        self.frames
            .last()
            .and_then(|last| crate::rank::rank_of(last, model))
            .unwrap_or(self.models.len())
    }

    /// Project the frames into presentation items, carrying the running-best
    /// fields when `use_best_move` is set and the raw round fields otherwise.
    #[must_use]
    pub fn build_frames(&self, use_best_move: bool) -> Vec<Vec<FrameItem>> {
        self.frames
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .map(|entry| {
                        let (score, move_text, token_scores) = if use_best_move {
                            (
                                entry.best_score,
                                entry.best_move.clone(),
                                entry.best_token_scores.clone(),
                            )
                        } else {
                            (entry.score, entry.move_text.clone(), entry.token_scores.clone())
                        };
                        FrameItem {
                            model: entry.model.clone(),
                            nice_model: entry.nice_model.clone(),
                            company: entry.company,
                            color: entry.color,
                            logo: entry.logo_src,
                            score,
                            move_text,
                            token_scores,
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn model_index(&self, model: &str) -> Option<usize> {
        self.models.iter().position(|m| m == model)
    }
}
