//! # rust-rps
//!
//! A timed, best-of-N Rock-Paper-Scissors match engine with an adaptive
//! computer opponent.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: `GameEngine` owns match state and player records.
//!    Hosts feed it input and time, and read snapshots or events back.
//!
//! 2. **Injected Time and Randomness**: The countdown reads a `Clock` and the
//!    computer draws from a seeded `GameRng`, so every match can be replayed
//!    in a test without sleeping.
//!
//! 3. **Presentation Agnostic**: No rendering, audio or windowing. Listeners
//!    receive `EngineEvent`s after each transition has been applied.
//!
//! ## Modules
//!
//! - `core`: Gestures, sides, match state, RNG, clock, configuration
//! - `ai`: Opponent history and the tiered decision engine
//! - `input`: Key bindings and the key-repeat / burst guard
//! - `players`: Interactive and autonomous player records
//! - `engine`: The match orchestrator, round outcomes, events, snapshots
//! - `error`: Submission rejection reasons

pub mod core;
pub mod ai;
pub mod input;
pub mod players;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Gesture, Side, SideMap,
    GameRng,
    Clock, ManualClock, SystemClock,
    ConfigError, Difficulty, GameMode, MatchConfig,
    MatchState, RoundPhase, Tally,
};

pub use crate::ai::{
    DecisionConfig, DecisionEngine, OpponentHistory,
    Decision, DecisionBasis, DecisionPolicy,
    UniformPolicy, FrequencyPolicy, PatternPolicy,
};

pub use crate::input::{GuardConfig, InputGuard, KeyBindings, KeyVerdict};

pub use crate::players::{ComputerBrain, Player, PlayerKind};

pub use crate::engine::{
    GameEngine, RoundOutcome, RoundReport,
    EngineEvent, EngineListener, EventKind, EventLog, ChannelListener, ListenerId,
    MatchSnapshot, PlayerView,
};

pub use crate::error::SubmitError;
