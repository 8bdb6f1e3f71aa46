//! Tier dispatch for the computer opponent.

use tracing::trace;

use crate::core::{Difficulty, GameRng};

use super::config::DecisionConfig;
use super::history::OpponentHistory;
use super::policy::{Decision, DecisionPolicy, FrequencyPolicy, PatternPolicy, UniformPolicy};

/// Turns a difficulty tier and an opponent history into one gesture.
///
/// Stateless: the history and RNG are passed in on every call, so the same
/// `(tier, history, rng state)` always yields the same decision.
///
/// ```
/// use rust_rps::ai::{DecisionEngine, OpponentHistory};
/// use rust_rps::core::{Difficulty, GameRng, Gesture};
///
/// let engine = DecisionEngine::new(Difficulty::Medium);
/// let history: OpponentHistory = [Gesture::Rock, Gesture::Rock, Gesture::Paper].into_iter().collect();
/// let decision = engine.decide(&history, &mut GameRng::new(0));
/// assert_eq!(decision.gesture, Gesture::Paper);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecisionEngine {
    difficulty: Difficulty,
    pattern: PatternPolicy,
}

impl DecisionEngine {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, DecisionConfig::default())
    }

    #[must_use]
    pub fn with_config(difficulty: Difficulty, config: DecisionConfig) -> Self {
        Self {
            difficulty,
            pattern: PatternPolicy::new(config),
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn decide(&self, history: &OpponentHistory, rng: &mut GameRng) -> Decision {
        let decision = match self.difficulty {
            Difficulty::Easy => UniformPolicy.decide(history, rng),
            Difficulty::Medium => FrequencyPolicy.decide(history, rng),
            Difficulty::Hard => self.pattern.decide(history, rng),
        };

        trace!(
            difficulty = ?self.difficulty,
            tier_used = ?decision.tier,
            history_len = history.len(),
            basis = ?decision.basis,
            gesture = %decision.gesture,
            "computer decision"
        );

        decision
    }
}
