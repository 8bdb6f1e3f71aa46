//! Player variants and their per-round submission state.

pub mod player;

pub use player::{ComputerBrain, Player, PlayerKind};
