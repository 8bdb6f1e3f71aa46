//! Core engine types: gestures, sides, match state, RNG, clock, configuration.
//!
//! These are plain values with no knowledge of players or listeners.
//! The engine composes them; hosts mostly read them.

pub mod gesture;
pub mod side;
pub mod rng;
pub mod clock;
pub mod config;
pub mod state;

pub use gesture::Gesture;
pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, Difficulty, GameMode, MatchConfig, DEFAULT_COUNTDOWN, DEFAULT_MAX_ROUNDS};
pub use state::{MatchState, RoundPhase, Tally};
