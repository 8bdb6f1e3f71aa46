//! Round classification.

use serde::{Deserialize, Serialize};

use crate::core::{Gesture, Side, SideMap};

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Both sides played; `winner`'s gesture dominated.
    Decided { winner: Side },
    /// Only `winner` played before the round closed.
    Forfeit { winner: Side },
    /// Both sides played the same gesture.
    Draw,
    /// Neither side played.
    DoubleForfeit,
}

impl RoundOutcome {
    /// Classify a round from the committed gestures.
    ///
    /// ```
    /// use rust_rps::core::{Gesture, Side};
    /// use rust_rps::engine::RoundOutcome;
    ///
    /// let outcome = RoundOutcome::resolve(Some(Gesture::Rock), Some(Gesture::Paper));
    /// assert_eq!(outcome, RoundOutcome::Decided { winner: Side::B });
    /// assert_eq!(RoundOutcome::resolve(None, Some(Gesture::Rock)).winner(), Some(Side::B));
    /// ```
    #[must_use]
    pub fn resolve(a: Option<Gesture>, b: Option<Gesture>) -> Self {
        match (a, b) {
            (None, None) => RoundOutcome::DoubleForfeit,
            (Some(_), None) => RoundOutcome::Forfeit { winner: Side::A },
            (None, Some(_)) => RoundOutcome::Forfeit { winner: Side::B },
            (Some(a), Some(b)) if a == b => RoundOutcome::Draw,
            (Some(a), Some(b)) => RoundOutcome::Decided {
                winner: if a.beats(b) { Side::A } else { Side::B },
            },
        }
    }

    /// The side credited with the round, if any.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            RoundOutcome::Decided { winner } | RoundOutcome::Forfeit { winner } => Some(winner),
            RoundOutcome::Draw | RoundOutcome::DoubleForfeit => None,
        }
    }

    /// Did at least one side fail to play?
    #[must_use]
    pub fn is_forfeit(self) -> bool {
        matches!(self, RoundOutcome::Forfeit { .. } | RoundOutcome::DoubleForfeit)
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn reason(self, gestures: &SideMap<Option<Gesture>>, names: &SideMap<&str>) -> String {
        match self {
            RoundOutcome::Decided { winner } => match (gestures[winner], gestures[winner.other()]) {
                (Some(w), Some(l)) => format!("{} beats {}", w, l),
                _ => String::new(),
            },
            RoundOutcome::Forfeit { winner } => format!("{} forfeited!", names[winner.other()]),
            RoundOutcome::Draw => "It's a tie!".to_string(),
            RoundOutcome::DoubleForfeit => "Both players forfeited!".to_string(),
        }
    }
}

/// Everything presentation needs about a scored round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub gesture_a: Option<Gesture>,
    pub gesture_b: Option<Gesture>,
    pub outcome: RoundOutcome,
    pub reason: String,
}

impl RoundReport {
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }

    #[must_use]
    pub fn gesture(&self, side: Side) -> Option<Gesture> {
        match side {
            Side::A => self.gesture_a,
            Side::B => self.gesture_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Gesture::*;

    fn names() -> SideMap<&'static str> {
        SideMap::from_pair("Ann", "Bob")
    }

    #[test]
    fn test_resolve_all_pairs() {
        for a in Gesture::ALL {
            for b in Gesture::ALL {
                let outcome = RoundOutcome::resolve(Some(a), Some(b));
                if a == b {
                    assert_eq!(outcome, RoundOutcome::Draw);
                } else if a.beats(b) {
                    assert_eq!(outcome.winner(), Some(Side::A));
                } else {
                    assert_eq!(outcome.winner(), Some(Side::B));
                }
                assert!(!outcome.is_forfeit());
            }
        }
    }

    #[test]
    fn test_resolve_forfeits() {
        assert_eq!(RoundOutcome::resolve(None, None), RoundOutcome::DoubleForfeit);
        assert_eq!(
            RoundOutcome::resolve(Some(Rock), None),
            RoundOutcome::Forfeit { winner: Side::A }
        );
        assert_eq!(RoundOutcome::resolve(None, None).winner(), None);
        assert!(RoundOutcome::resolve(None, Some(Paper)).is_forfeit());
    }

    #[test]
    fn test_reasons() {
        let gestures = SideMap::from_pair(Some(Scissors), Some(Paper));
        let decided = RoundOutcome::resolve(gestures[Side::A], gestures[Side::B]);
        assert_eq!(decided.reason(&gestures, &names()), "Scissors beats Paper");

        let gestures = SideMap::from_pair(Some(Rock), Some(Paper));
        let decided = RoundOutcome::resolve(gestures[Side::A], gestures[Side::B]);
        assert_eq!(decided.reason(&gestures, &names()), "Paper beats Rock");

        let gestures = SideMap::from_pair(None, Some(Paper));
        assert_eq!(
            RoundOutcome::Forfeit { winner: Side::B }.reason(&gestures, &names()),
            "Ann forfeited!"
        );

        let none = SideMap::with_value(None);
        assert_eq!(RoundOutcome::DoubleForfeit.reason(&none, &names()), "Both players forfeited!");
        assert_eq!(RoundOutcome::Draw.reason(&none, &names()), "It's a tie!");
    }
}
