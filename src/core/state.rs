//! Match state and round state machine.
//!
//! ## Phases
//!
//! ```text
//! Idle -> CountdownActive -> Resolved -> CountdownActive -> ... -> MatchFinished
//! ```
//!
//! `MatchState` only tracks counters, phase, and deadline. It never touches
//! players; the engine resets them around `start_round`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::GameMode;
use super::side::{Side, SideMap};

/// Where the current round is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round has started yet.
    #[default]
    Idle,
    /// Accepting gestures until the deadline.
    CountdownActive,
    /// The last round has been scored; the next may start.
    Resolved,
    /// Majority reached or round cap hit. Terminal until reset.
    MatchFinished,
}

/// Running score of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    pub side_a_wins: u32,
    pub side_b_wins: u32,
    pub draws: u32,
    pub rounds_played: u32,
}

impl Tally {
    /// Wins for one side.
    #[must_use]
    pub const fn wins(&self, side: Side) -> u32 {
        match side {
            Side::A => self.side_a_wins,
            Side::B => self.side_b_wins,
        }
    }
}

/// Counters, phase, and countdown for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    mode: GameMode,
    max_rounds: u32,
    current_round: u32,
    wins: SideMap<u32>,
    draws: u32,
    phase: RoundPhase,
    countdown: Duration,
    deadline: Option<Duration>,
}

impl MatchState {
    /// Fresh state. `max_rounds` is clamped to at least 1.
    #[must_use]
    pub fn new(mode: GameMode, max_rounds: u32, countdown: Duration) -> Self {
        Self {
            mode,
            max_rounds: max_rounds.max(1),
            current_round: 0,
            wins: SideMap::with_value(0),
            draws: 0,
            phase: RoundPhase::Idle,
            countdown,
            deadline: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// 1-based index of the latest started round (0 before the first).
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    #[must_use]
    pub fn wins(&self, side: Side) -> u32 {
        self.wins[side]
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Deadline of the latest round, kept after it resolves.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Is a round accepting gestures?
    #[must_use]
    pub fn is_round_active(&self) -> bool {
        self.phase == RoundPhase::CountdownActive
    }

    /// Wins needed for an outright majority.
    #[must_use]
    pub fn wins_needed(&self) -> u32 {
        self.max_rounds / 2 + 1
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally {
            side_a_wins: self.wins[Side::A],
            side_b_wins: self.wins[Side::B],
            draws: self.draws,
            rounds_played: self.current_round,
        }
    }

    // === Transitions ===

    /// Open the next round with a deadline of `now + countdown`.
    ///
    /// Returns `false` (and changes nothing) once the match is finished.
    pub fn start_round(&mut self, now: Duration) -> bool {
        if self.is_match_finished() {
            self.phase = RoundPhase::MatchFinished;
            return false;
        }

        self.current_round += 1;
        self.phase = RoundPhase::CountdownActive;
        self.deadline = Some(now.saturating_add(self.countdown));
        true
    }

    /// Score a won round.
    pub fn record_win(&mut self, side: Side) {
        self.wins[side] += 1;
        self.close_round();
    }

    /// Score a drawn round.
    pub fn record_draw(&mut self) {
        self.draws += 1;
        self.close_round();
    }

    fn close_round(&mut self) {
        self.phase = if self.is_match_finished() {
            RoundPhase::MatchFinished
        } else {
            RoundPhase::Resolved
        };
    }

    /// Back to the initial state; mode, length, and countdown are kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode, self.max_rounds, self.countdown);
    }

    // === Queries ===

    /// Time left before the latest deadline, zero once it has passed.
    ///
    /// The deadline outlives its round, so the timer keeps running down to
    /// zero after resolution. Before the first round the full countdown is
    /// reported.
    #[must_use]
    pub fn time_remaining(&self, now: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_sub(now),
            None => self.countdown,
        }
    }

    /// Has the active round's deadline passed?
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        self.is_round_active() && self.time_remaining(now).is_zero()
    }

    /// Majority reached by either side, or the round cap hit.
    #[must_use]
    pub fn is_match_finished(&self) -> bool {
        let needed = self.wins_needed();
        self.wins[Side::A] >= needed
            || self.wins[Side::B] >= needed
            || self.current_round >= self.max_rounds
    }

    /// Side with strictly more wins; `None` on equal wins.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        let (a, b) = (self.wins[Side::A], self.wins[Side::B]);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}
