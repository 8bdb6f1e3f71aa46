//! Input-symbol to gesture mappings for interactive players.

use rustc_hash::FxHashMap;

use crate::core::Gesture;

/// Three distinct, case-folded keys mapped to the three gestures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    keys: [char; 3],
    lookup: FxHashMap<char, Gesture>,
}

impl KeyBindings {
    /// Bind keys for Rock, Paper, and Scissors.
    ///
    /// Returns `None` unless the three keys are distinct ignoring case.
    #[must_use]
    pub fn new(rock: char, paper: char, scissors: char) -> Option<Self> {
        let keys = [rock, paper, scissors].map(|k| k.to_ascii_lowercase());
        let lookup: FxHashMap<char, Gesture> = keys.into_iter().zip(Gesture::ALL).collect();
        if lookup.len() != keys.len() {
            return None;
        }
        Some(Self { keys, lookup })
    }

    /// `R` / `P` / `S`: the lone human in human-vs-computer.
    #[must_use]
    pub fn rps() -> Self {
        Self::preset(['r', 'p', 's'])
    }

    /// `A` / `S` / `D`: left-hand side in human-vs-human.
    #[must_use]
    pub fn left_hand() -> Self {
        Self::preset(['a', 's', 'd'])
    }

    /// `J` / `K` / `L`: right-hand side in human-vs-human.
    #[must_use]
    pub fn right_hand() -> Self {
        Self::preset(['j', 'k', 'l'])
    }

    fn preset(keys: [char; 3]) -> Self {
        Self {
            keys,
            lookup: keys.into_iter().zip(Gesture::ALL).collect(),
        }
    }

    /// Gesture bound to `key`, ignoring case.
    #[must_use]
    pub fn gesture_for(&self, key: char) -> Option<Gesture> {
        self.lookup.get(&key.to_ascii_lowercase()).copied()
    }

    /// Key bound to `gesture` (lowercase).
    #[must_use]
    pub fn key_for(&self, gesture: Gesture) -> char {
        self.keys[gesture.index()]
    }

    /// e.g. `"Alice: R=Rock, P=Paper, S=Scissors"`.
    #[must_use]
    pub fn describe(&self, name: &str) -> String {
        let parts: Vec<String> = Gesture::ALL
            .iter()
            .map(|g| format!("{}={}", self.key_for(*g).to_ascii_uppercase(), g))
            .collect();
        format!("{}: {}", name, parts.join(", "))
    }
}
