//! Adaptive computer opponent.
//!
//! ## Tiers
//!
//! | Tier | Policy | Falls back to |
//! |------|--------|---------------|
//! | 0 | `UniformPolicy` | - |
//! | 1 | `FrequencyPolicy` | tier 0 on empty history |
//! | 2 | `PatternPolicy` | tier 1 below `pattern_min_history` |
//!
//! All randomness goes through an injected `GameRng`, so a seeded match
//! replays the same computer choices.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod history;
pub mod policy;

pub use config::DecisionConfig;
pub use engine::DecisionEngine;
pub use history::OpponentHistory;
pub use policy::{Decision, DecisionBasis, DecisionPolicy, FrequencyPolicy, PatternPolicy, UniformPolicy};
