//! Decision policies, one per difficulty tier.
//!
//! Policies are trait-based so hosts can plug in their own opponent:
//! - `UniformPolicy`: tier 0, pure chance
//! - `FrequencyPolicy`: tier 1, counter the most frequent gesture
//! - `PatternPolicy`: tier 2, recency weighting + cycle prediction + noise
//!
//! Higher tiers fall back to lower ones when the history is too short.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GameRng, Gesture};

use super::analysis::{argmax, most_frequent, predict_cycle, recency_scores};
use super::config::DecisionConfig;
use super::history::OpponentHistory;

/// Why a gesture was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionBasis {
    /// Uniform random draw (tier 0, or an empty history).
    Uniform,
    /// Counter to the opponent's most frequent gesture.
    CounterMostFrequent(Gesture),
    /// Counter to the highest-scoring predicted gesture.
    CounterPredicted(Gesture),
    /// Prediction discarded for a random draw.
    Exploration,
}

/// A chosen gesture together with how it was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub gesture: Gesture,
    pub basis: DecisionBasis,
    /// Tier whose logic actually produced the gesture after fallbacks.
    pub tier: Difficulty,
}

/// Chooses the next gesture from an opponent history.
///
/// Implementations must be pure apart from drawing on `rng`.
pub trait DecisionPolicy {
    fn decide(&self, history: &OpponentHistory, rng: &mut GameRng) -> Decision;
}

/// Tier 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPolicy;

impl DecisionPolicy for UniformPolicy {
    fn decide(&self, _history: &OpponentHistory, rng: &mut GameRng) -> Decision {
        Decision {
            gesture: Gesture::random(rng),
            basis: DecisionBasis::Uniform,
            tier: Difficulty::Easy,
        }
    }
}

/// Tier 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrequencyPolicy;

impl DecisionPolicy for FrequencyPolicy {
    fn decide(&self, history: &OpponentHistory, rng: &mut GameRng) -> Decision {
        match most_frequent(history) {
            Some(favorite) => Decision {
                gesture: favorite.counter(),
                basis: DecisionBasis::CounterMostFrequent(favorite),
                tier: Difficulty::Medium,
            },
            None => UniformPolicy.decide(history, rng),
        }
    }
}

/// Tier 2.
#[derive(Clone, Debug, Default)]
pub struct PatternPolicy {
    config: DecisionConfig,
}

impl PatternPolicy {
    #[must_use]
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// The gesture the opponent is expected to play next, without noise.
    ///
    /// `None` when the history is too short for pattern analysis.
    #[must_use]
    pub fn predict(&self, history: &OpponentHistory) -> Option<Gesture> {
        if history.len() < self.config.pattern_min_history.max(1) {
            return None;
        }

        let (mut scores, total) = recency_scores(history, self.config.recency_base);

        if let Some(predicted) = history
            .last_two()
            .and_then(|(second_last, last)| predict_cycle(second_last, last))
        {
            scores[predicted.index()] += total * self.config.cycle_bonus;
        }

        Some(argmax(&scores))
    }
}

impl DecisionPolicy for PatternPolicy {
    fn decide(&self, history: &OpponentHistory, rng: &mut GameRng) -> Decision {
        let Some(predicted) = self.predict(history) else {
            return FrequencyPolicy.decide(history, rng);
        };

        if rng.gen_bool(self.config.exploration_rate) {
            return Decision {
                gesture: Gesture::random(rng),
                basis: DecisionBasis::Exploration,
                tier: Difficulty::Hard,
            };
        }

        Decision {
            gesture: predicted.counter(),
            basis: DecisionBasis::CounterPredicted(predicted),
            tier: Difficulty::Hard,
        }
    }
}
