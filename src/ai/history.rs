//! Append-only record of the opponent's revealed gestures.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Gesture;

/// Opponent gestures, oldest first.
///
/// Backed by a persistent vector so snapshots clone in O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentHistory {
    moves: Vector<Gesture>,
}

impl OpponentHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one revealed gesture.
    pub fn push(&mut self, gesture: Gesture) {
        self.moves.push_back(gesture);
    }

    /// Forget everything. Only done between matches.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Gesture> + ExactSizeIterator + '_ {
        self.moves.iter().copied()
    }

    /// The two most recent gestures as `(second_last, last)`.
    #[must_use]
    pub fn last_two(&self) -> Option<(Gesture, Gesture)> {
        let mut recent = self.moves.iter().rev();
        let last = *recent.next()?;
        let second_last = *recent.next()?;
        Some((second_last, last))
    }
}

impl FromIterator<Gesture> for OpponentHistory {
    fn from_iter<I: IntoIterator<Item = Gesture>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}
