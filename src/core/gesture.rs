//! The three gestures and their cyclic dominance relation.
//!
//! Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
//! A gesture never beats itself.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// One of the three moves.
///
/// Variant order doubles as the deterministic tie-break preference used by
/// the decision engine: Rock, then Paper, then Scissors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
}

impl Gesture {
    /// All gestures in preference order.
    pub const ALL: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissors];

    /// Does `self` beat `other`?
    ///
    /// ```
    /// use rust_rps::core::Gesture;
    ///
    /// assert!(Gesture::Rock.beats(Gesture::Scissors));
    /// assert!(!Gesture::Scissors.beats(Gesture::Rock));
    /// assert!(!Gesture::Paper.beats(Gesture::Paper));
    /// ```
    #[must_use]
    pub const fn beats(self, other: Gesture) -> bool {
        matches!(
            (self, other),
            (Gesture::Rock, Gesture::Scissors)
                | (Gesture::Scissors, Gesture::Paper)
                | (Gesture::Paper, Gesture::Rock)
        )
    }

    /// The gesture that beats `self`.
    #[must_use]
    pub const fn counter(self) -> Gesture {
        match self {
            Gesture::Rock => Gesture::Paper,
            Gesture::Paper => Gesture::Scissors,
            Gesture::Scissors => Gesture::Rock,
        }
    }

    /// Dense index (0..3) in preference order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Gesture::Rock => "Rock",
            Gesture::Paper => "Paper",
            Gesture::Scissors => "Scissors",
        }
    }

    /// Single-letter code.
    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            Gesture::Rock => "R",
            Gesture::Paper => "P",
            Gesture::Scissors => "S",
        }
    }

    /// Look up a gesture by its short code, ignoring case.
    ///
    /// Returns `None` for anything that is not exactly one recognized letter.
    #[must_use]
    pub fn parse(code: &str) -> Option<Gesture> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Single-character form of [`Gesture::parse`].
    #[must_use]
    pub fn from_char(code: char) -> Option<Gesture> {
        match code.to_ascii_uppercase() {
            'R' => Some(Gesture::Rock),
            'P' => Some(Gesture::Paper),
            'S' => Some(Gesture::Scissors),
            _ => None,
        }
    }

    /// Draw a gesture uniformly at random.
    pub fn random(rng: &mut GameRng) -> Gesture {
        rng.gen_gesture()
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
