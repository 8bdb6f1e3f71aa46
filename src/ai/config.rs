//! Decision engine tuning parameters.

use serde::{Deserialize, Serialize};

/// Knobs for the pattern tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Recency weighting base: entry `i` (oldest = 0) weighs `recency_base^i`.
    pub recency_base: f64,

    /// Fraction of the total weight added to a predicted cycle continuation.
    pub cycle_bonus: f64,

    /// Chance of discarding the prediction for a uniform random gesture.
    pub exploration_rate: f64,

    /// Shortest history the pattern tier analyzes. Shorter histories fall
    /// back to frequency counting.
    pub pattern_min_history: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            recency_base: 1.2,
            cycle_bonus: 0.3,
            exploration_rate: 0.2,
            pattern_min_history: 3,
        }
    }
}

impl DecisionConfig {
    /// Set the exploration rate (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_recency_base(mut self, base: f64) -> Self {
        self.recency_base = base;
        self
    }

    #[must_use]
    pub fn with_cycle_bonus(mut self, bonus: f64) -> Self {
        self.cycle_bonus = bonus;
        self
    }

    /// No exploration noise. Useful for deterministic tests.
    #[must_use]
    pub fn greedy() -> Self {
        Self::default().with_exploration_rate(0.0)
    }
}
