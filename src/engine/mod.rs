//! Match orchestration.
//!
//! - `game`: the `GameEngine` state machine
//! - `outcome`: round classification and reports
//! - `events`: notifications and listener registration
//! - `snapshot`: read-only views for presentation

pub mod events;
pub mod game;
pub mod outcome;
pub mod snapshot;

pub use events::{ChannelListener, EngineEvent, EngineListener, EventKind, EventLog, ListenerId, ListenerRegistry};
pub use game::GameEngine;
pub use outcome::{RoundOutcome, RoundReport};
pub use snapshot::{MatchSnapshot, PlayerView};
