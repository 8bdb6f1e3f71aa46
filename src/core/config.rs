//! Match configuration.
//!
//! Everything a host decides before a match starts:
//! - `GameMode`: who is playing whom
//! - `Difficulty`: which decision tier the computer side uses
//! - `MatchConfig`: rounds, names, countdown, seed, and tuning knobs
//!
//! Out-of-range values are clamped, never rejected.

use std::time::Duration;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::ai::DecisionConfig;
use crate::input::GuardConfig;

/// Default countdown for each round.
pub const DEFAULT_COUNTDOWN: Duration = Duration::from_millis(3000);

/// Default best-of length.
pub const DEFAULT_MAX_ROUNDS: u32 = 5;

/// Match mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Side A is interactive, side B is the computer.
    #[default]
    HumanVsComputer,
    /// Both sides are interactive, sharing one keyboard.
    HumanVsHuman,
}

impl GameMode {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            GameMode::HumanVsComputer => "Player vs Computer",
            GameMode::HumanVsHuman => "Player vs Player",
        }
    }

    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            GameMode::HumanVsComputer => "PvC",
            GameMode::HumanVsHuman => "PvP",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Computer difficulty tier.
///
/// Config documents may give either the tier name or a raw level; levels
/// are clamped through [`Difficulty::from_level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum Difficulty {
    /// Tier 0: uniform random.
    Easy,
    /// Tier 1: counter the opponent's most frequent gesture.
    #[default]
    Medium,
    /// Tier 2: recency weighting, cycle prediction, exploration noise.
    Hard,
}

impl Difficulty {
    /// Map a raw level onto a tier, clamping to `0..=2`.
    ///
    /// ```
    /// use rust_rps::core::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_level(-4), Difficulty::Easy);
    /// assert_eq!(Difficulty::from_level(1), Difficulty::Medium);
    /// assert_eq!(Difficulty::from_level(9), Difficulty::Hard);
    /// ```
    #[must_use]
    pub const fn from_level(level: i64) -> Self {
        if level <= 0 {
            Difficulty::Easy
        } else if level == 1 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    /// Numeric tier (0, 1, or 2).
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (Random)",
            Difficulty::Medium => "Medium (Basic Pattern)",
            Difficulty::Hard => "Hard (Advanced Pattern)",
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DifficultyVisitor)
    }
}

struct DifficultyVisitor;

impl<'de> Visitor<'de> for DifficultyVisitor {
    type Value = Difficulty;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a difficulty level or one of \"Easy\", \"Medium\", \"Hard\"")
    }

    fn visit_i64<E: de::Error>(self, level: i64) -> Result<Difficulty, E> {
        Ok(Difficulty::from_level(level))
    }

    fn visit_u64<E: de::Error>(self, level: u64) -> Result<Difficulty, E> {
        Ok(Difficulty::from_level(i64::try_from(level).unwrap_or(i64::MAX)))
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Difficulty, E> {
        match name {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            _ => Err(E::unknown_variant(name, &["Easy", "Medium", "Hard"])),
        }
    }
}

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid match configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings consumed by `GameEngine::initialize`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Who plays whom.
    pub mode: GameMode,

    /// Best-of length. Always at least 1.
    pub max_rounds: u32,

    /// Display name for side A.
    pub name_a: String,

    /// Display name for side B.
    pub name_b: String,

    /// Tier used by the computer side (ignored in human-vs-human).
    pub difficulty: Difficulty,

    /// How long each round accepts input.
    #[serde(with = "millis")]
    pub countdown: Duration,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Decision engine tuning.
    pub decision: DecisionConfig,

    /// Key-press rate limiting.
    pub input_guard: GuardConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            name_a: "Player 1".to_string(),
            name_b: "Computer".to_string(),
            difficulty: Difficulty::default(),
            countdown: DEFAULT_COUNTDOWN,
            seed: None,
            decision: DecisionConfig::default(),
            input_guard: GuardConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Configuration for the given mode with default settings.
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        let name_b = match mode {
            GameMode::HumanVsComputer => "Computer",
            GameMode::HumanVsHuman => "Player 2",
        };
        Self {
            mode,
            name_b: name_b.to_string(),
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Set the best-of length (clamped to at least 1).
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }

    #[must_use]
    pub fn with_names(mut self, name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        self.name_a = name_a.into();
        self.name_b = name_b.into();
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the difficulty from a raw level (clamped to `0..=2`).
    #[must_use]
    pub fn with_difficulty_level(mut self, level: i64) -> Self {
        self.difficulty = Difficulty::from_level(level);
        self
    }

    #[must_use]
    pub fn with_countdown(mut self, countdown: Duration) -> Self {
        self.countdown = countdown;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_decision(mut self, decision: DecisionConfig) -> Self {
        self.decision = decision;
        self
    }

    #[must_use]
    pub fn with_input_guard(mut self, guard: GuardConfig) -> Self {
        self.input_guard = guard;
        self
    }

    /// Re-apply clamping after deserialization or direct field edits.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.max_rounds = self.max_rounds.max(1);
        self
    }
}

/// `Duration` as integer milliseconds in config documents.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
