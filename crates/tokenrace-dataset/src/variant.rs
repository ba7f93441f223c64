//! Game variants and their expected reward shapes.

/// The three token-game variants, distinguished by how many reference texts
/// a round attributes against and in which direction.
///
/// Every round of a log must carry exactly one reward event per expected
/// slot, with the slot's scale:
///
/// - `Condense`: one text to maximize (`[1]`)
/// - `Contrast`: one text to maximize then one to minimize (`[1, -1]`)
/// - `Synthesize`: three texts to maximize jointly (`[1, 1, 1]`)
///
/// The variant name doubles as the game name used in benchmark exports, so
/// `"Condense".parse::<GameVariant>()` resolves the variant of a log group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::FromStr,
)]
pub enum GameVariant {
    Condense,
    Contrast,
    Synthesize,
}

impl GameVariant {
    /// Expected reward scale per positional slot.
    #[must_use]
    pub fn expected_scales(self) -> &'static [f64] {
        match self {
            GameVariant::Condense => &[1.0],
            GameVariant::Contrast => &[1.0, -1.0],
            GameVariant::Synthesize => &[1.0, 1.0, 1.0],
        }
    }

    /// Number of reward events a round must carry.
    #[must_use]
    pub fn reward_count(self) -> usize {
        self.expected_scales().len()
    }
}
