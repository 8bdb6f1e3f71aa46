//! Read-only view of a match for presentation code.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::millis;
use crate::core::{Difficulty, GameMode, Gesture, MatchState, RoundPhase, SideMap, Tally};
use crate::players::Player;

/// What presentation may know about one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub interactive: bool,
    /// Tier of an autonomous side.
    pub difficulty: Option<Difficulty>,
    pub submitted: bool,
    /// Only filled in once the round is resolved.
    pub revealed: Option<Gesture>,
    /// e.g. `"Alice: R=Rock, P=Paper, S=Scissors"` for interactive sides.
    pub key_help: Option<String>,
}

impl PlayerView {
    fn new(player: &Player, reveal: bool) -> Self {
        Self {
            name: player.name().to_string(),
            interactive: player.is_interactive(),
            difficulty: player.brain().map(|brain| brain.difficulty()),
            submitted: player.has_submitted(),
            revealed: if reveal { player.gesture() } else { None },
            key_help: player.bindings().map(|bindings| bindings.describe(player.name())),
        }
    }
}

/// Serializable picture of the whole match at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub mode: GameMode,
    pub phase: RoundPhase,
    pub round: u32,
    pub max_rounds: u32,
    pub tally: Tally,
    #[serde(with = "millis")]
    pub time_remaining: Duration,
    pub players: SideMap<PlayerView>,
}

impl MatchSnapshot {
    pub(crate) fn capture(state: &MatchState, players: &SideMap<Player>, now: Duration) -> Self {
        let reveal = matches!(state.phase(), RoundPhase::Resolved | RoundPhase::MatchFinished);
        Self {
            mode: state.mode(),
            phase: state.phase(),
            round: state.current_round(),
            max_rounds: state.max_rounds(),
            tally: state.tally(),
            time_remaining: state.time_remaining(now),
            players: players.map(|_, player| PlayerView::new(player, reveal)),
        }
    }
}
