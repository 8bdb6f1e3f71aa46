//! The match orchestrator.
//!
//! `GameEngine` is the only writer of match state and player records.
//! Hosts feed it input events and time, and read snapshots back.
//!
//! ## Driving a match
//!
//! ```
//! use std::time::Duration;
//! use rust_rps::core::{GameMode, ManualClock, MatchConfig, Side};
//! use rust_rps::engine::GameEngine;
//!
//! let clock = ManualClock::new();
//! let mut engine = GameEngine::new(clock.clone());
//! engine.initialize(MatchConfig::new(GameMode::HumanVsHuman).with_max_rounds(3));
//!
//! engine.start_round();
//! engine.submit_input(Side::A, 'a').unwrap(); // Rock
//! engine.submit_input(Side::B, 'l').unwrap(); // Scissors
//! assert_eq!(engine.state().unwrap().wins(Side::A), 1);
//!
//! // Nobody plays in round two: the deadline passes and the host polls.
//! engine.start_round();
//! clock.advance(Duration::from_secs(3));
//! let report = engine.poll().unwrap();
//! assert_eq!(report.reason, "Both players forfeited!");
//! ```

use std::time::Duration;

use smallvec::{smallvec, SmallVec};
use tracing::{debug, info};

use crate::core::{
    Clock, Difficulty, GameMode, GameRng, Gesture, MatchConfig, MatchState, RoundPhase, Side, SideMap, SystemClock,
};
use crate::error::SubmitError;
use crate::input::{InputGuard, KeyBindings, KeyVerdict};
use crate::players::{ComputerBrain, Player};

use super::events::{EngineEvent, EngineListener, ListenerId, ListenerRegistry};
use super::outcome::{RoundOutcome, RoundReport};
use super::snapshot::MatchSnapshot;

type Pending = SmallVec<[EngineEvent; 4]>;

/// Everything that exists only while a match is configured.
#[derive(Debug)]
struct Session {
    config: MatchConfig,
    state: MatchState,
    players: SideMap<Player>,
    guard: InputGuard,
    last_round: Option<RoundReport>,
}

impl Session {
    fn new(config: MatchConfig) -> Self {
        let config = config.normalized();
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let players = match config.mode {
            GameMode::HumanVsComputer => {
                let brain = ComputerBrain::new(config.difficulty, config.decision.clone(), rng.fork());
                SideMap::from_pair(
                    Player::interactive(Side::A, config.name_a.clone(), KeyBindings::rps()),
                    Player::autonomous(Side::B, config.name_b.clone(), brain),
                )
            }
            GameMode::HumanVsHuman => SideMap::from_pair(
                Player::interactive(Side::A, config.name_a.clone(), KeyBindings::left_hand()),
                Player::interactive(Side::B, config.name_b.clone(), KeyBindings::right_hand()),
            ),
        };

        Self {
            state: MatchState::new(config.mode, config.max_rounds, config.countdown),
            guard: InputGuard::new(config.input_guard.clone()),
            players,
            last_round: None,
            config,
        }
    }

    fn initialized_event(&self) -> EngineEvent {
        EngineEvent::MatchInitialized {
            mode: self.state.mode(),
            max_rounds: self.state.max_rounds(),
        }
    }

    fn accepting_input(&self, now: Duration) -> Result<(), SubmitError> {
        if self.state.is_round_active() && !self.state.is_expired(now) {
            Ok(())
        } else {
            Err(SubmitError::InactiveRound)
        }
    }

    /// First interactive side, A before B, that binds `key` and has not
    /// submitted yet.
    fn route_key(&mut self, key: char) -> Result<(Side, Gesture), SubmitError> {
        let mut rejection = SubmitError::UnmappedInput { symbol: key };

        for side in Side::BOTH {
            let player = &mut self.players[side];
            match player.submit_symbol(key) {
                Ok(gesture) => return Ok((side, gesture)),
                Err(err @ SubmitError::DuplicateSubmission { .. }) => rejection = err,
                Err(_) => {}
            }
        }

        Err(rejection)
    }

    /// Resolve the round if both sides are in or time is up.
    fn check_completion(&mut self, now: Duration, events: &mut Pending) -> Option<RoundReport> {
        if !self.state.is_round_active() {
            return None;
        }

        let all_in = self.players.iter().all(|(_, player)| player.has_submitted());
        if all_in || self.state.is_expired(now) {
            Some(self.end_round(events))
        } else {
            None
        }
    }

    fn end_round(&mut self, events: &mut Pending) -> RoundReport {
        let gestures = self.players.map(|_, player| player.gesture());
        let outcome = RoundOutcome::resolve(gestures[Side::A], gestures[Side::B]);

        match outcome.winner() {
            Some(side) => self.state.record_win(side),
            None => self.state.record_draw(),
        }

        // Forfeits produced no real gesture, so nothing is learned from them.
        if let (Some(a), Some(b)) = (gestures[Side::A], gestures[Side::B]) {
            self.players[Side::A].observe_opponent(b);
            self.players[Side::B].observe_opponent(a);
        }

        let names = self.players.map(|_, player| player.name());
        let report = RoundReport {
            round: self.state.current_round(),
            gesture_a: gestures[Side::A],
            gesture_b: gestures[Side::B],
            outcome,
            reason: outcome.reason(&gestures, &names),
        };

        debug!(
            round = report.round,
            outcome = ?report.outcome,
            reason = %report.reason,
            "round resolved"
        );
        events.push(EngineEvent::RoundResult(report.clone()));

        if self.state.is_match_finished() {
            let winner = self.state.winner();
            let tally = self.state.tally();
            info!(
                winner = ?winner,
                side_a_wins = tally.side_a_wins,
                side_b_wins = tally.side_b_wins,
                draws = tally.draws,
                "match ended"
            );
            events.push(EngineEvent::MatchEnded { winner, tally });
        }

        self.last_round = Some(report.clone());
        report
    }
}

/// Owns one match at a time and arbitrates everything that happens in it.
pub struct GameEngine {
    clock: Box<dyn Clock + Send>,
    listeners: ListenerRegistry,
    session: Option<Session>,
}

impl GameEngine {
    /// Engine driven by the given clock. No match is configured yet.
    pub fn new(clock: impl Clock + Send + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            listeners: ListenerRegistry::new(),
            session: None,
        }
    }

    /// Engine driven by wall-clock time.
    #[must_use]
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock::new())
    }

    // === Listeners ===

    pub fn add_listener(&mut self, listener: impl EngineListener + Send + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // === Match lifecycle ===

    /// Set up a new match, discarding any previous one.
    pub fn initialize(&mut self, config: MatchConfig) {
        let session = Session::new(config);
        info!(
            mode = %session.config.mode,
            max_rounds = session.state.max_rounds(),
            name_a = %session.config.name_a,
            name_b = %session.config.name_b,
            difficulty = ?session.config.difficulty,
            "match initialized"
        );
        let event = session.initialized_event();
        self.session = Some(session);
        self.listeners.emit(&event);
    }

    /// Positional form of [`GameEngine::initialize`]; `difficulty` is clamped to `0..=2`.
    pub fn initialize_with(
        &mut self,
        mode: GameMode,
        max_rounds: u32,
        name_a: impl Into<String>,
        name_b: impl Into<String>,
        difficulty: i64,
    ) {
        let config = MatchConfig::new(mode)
            .with_max_rounds(max_rounds)
            .with_names(name_a, name_b)
            .with_difficulty(Difficulty::from_level(difficulty));
        self.initialize(config);
    }

    /// Start the current match over with the same configuration.
    ///
    /// Counters and computer history are cleared. Returns `false` if no
    /// match has been initialized.
    pub fn reset_match(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        session.state.reset();
        for (_, player) in session.players.iter_mut() {
            player.reset_for_match();
        }
        session.guard.reset();
        session.last_round = None;

        info!("match reset");
        let event = session.initialized_event();
        self.listeners.emit(&event);
        true
    }

    /// Open the next round.
    ///
    /// No-op (returns `false`) without a match, while a round is already
    /// running, or once the match is finished. The computer side, if any,
    /// commits its hidden choice immediately.
    pub fn start_round(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.state.is_round_active() {
            return false;
        }

        let now = self.clock.now();
        if !session.state.start_round(now) {
            return false;
        }

        for (_, player) in session.players.iter_mut() {
            player.reset_for_round();
            if let Some(decision) = player.make_choice() {
                // Freshly reset, so this cannot be a duplicate.
                let _ = player.submit(decision.gesture);
            }
        }

        let round = session.state.current_round();
        debug!(round, deadline = ?session.state.deadline(), "round started");
        self.listeners.emit(&EngineEvent::RoundStarted { round });
        true
    }

    // === Input ===

    /// Commit the gesture bound to `symbol` for `side`.
    ///
    /// Rejections leave the match untouched.
    pub fn submit_input(&mut self, side: Side, symbol: char) -> Result<Gesture, SubmitError> {
        let session = self.session.as_mut().ok_or(SubmitError::InactiveRound)?;
        let now = self.clock.now();
        session.accepting_input(now)?;

        let gesture = session.players[side].submit_symbol(symbol)?;
        debug!(side = %side, round = session.state.current_round(), "gesture submitted");

        let mut events: Pending = smallvec![EngineEvent::GestureSubmitted { side, gesture }];
        session.check_completion(now, &mut events);
        self.listeners.emit_all(events);
        Ok(gesture)
    }

    /// Route a key from a shared keyboard to whichever side binds it.
    pub fn process_key(&mut self, key: char) -> Result<(Side, Gesture), SubmitError> {
        let session = self.session.as_mut().ok_or(SubmitError::InactiveRound)?;
        let now = self.clock.now();
        session.accepting_input(now)?;

        let (side, gesture) = session.route_key(key)?;
        debug!(side = %side, round = session.state.current_round(), "gesture submitted");

        let mut events: Pending = smallvec![EngineEvent::GestureSubmitted { side, gesture }];
        session.check_completion(now, &mut events);
        self.listeners.emit_all(events);
        Ok((side, gesture))
    }

    /// Key-down from a physical keyboard: guard first, then routing.
    pub fn press_key(&mut self, key: char) -> Result<(Side, Gesture), SubmitError> {
        let session = self.session.as_mut().ok_or(SubmitError::InactiveRound)?;
        match session.guard.key_down(key, self.clock.now()) {
            KeyVerdict::Accepted => self.process_key(key),
            KeyVerdict::Repeat => Err(SubmitError::KeyRepeat { key }),
            KeyVerdict::Throttled => Err(SubmitError::Throttled),
        }
    }

    /// Key-up from a physical keyboard.
    pub fn release_key(&mut self, key: char) {
        if let Some(session) = self.session.as_mut() {
            session.guard.key_up(key);
        }
    }

    // === Completion ===

    /// Completion check at the engine clock's current time.
    ///
    /// Idempotent: once the round is resolved this does nothing.
    pub fn poll(&mut self) -> Option<RoundReport> {
        let now = self.clock.now();
        self.poll_at(now)
    }

    /// Completion check at an explicit time.
    pub fn poll_at(&mut self, now: Duration) -> Option<RoundReport> {
        let session = self.session.as_mut()?;
        let mut events = Pending::new();
        let report = session.check_completion(now, &mut events);
        self.listeners.emit_all(events);
        report
    }

    /// Close the active round now, whatever the deadline says.
    pub fn force_end_round(&mut self) -> Option<RoundReport> {
        let session = self.session.as_mut()?;
        if !session.state.is_round_active() {
            return None;
        }

        debug!(round = session.state.current_round(), "round force-ended");
        let mut events = Pending::new();
        let report = session.end_round(&mut events);
        self.listeners.emit_all(events);
        Some(report)
    }

    // === Read access ===

    #[must_use]
    pub fn config(&self) -> Option<&MatchConfig> {
        self.session.as_ref().map(|s| &s.config)
    }

    #[must_use]
    pub fn state(&self) -> Option<&MatchState> {
        self.session.as_ref().map(|s| &s.state)
    }

    #[must_use]
    pub fn player(&self, side: Side) -> Option<&Player> {
        self.session.as_ref().map(|s| &s.players[side])
    }

    #[must_use]
    pub fn last_round(&self) -> Option<&RoundReport> {
        self.session.as_ref().and_then(|s| s.last_round.as_ref())
    }

    /// Has the final round been scored?
    #[must_use]
    pub fn is_match_finished(&self) -> bool {
        self.state().is_some_and(|s| s.phase() == RoundPhase::MatchFinished)
    }

    /// Time left in the active round at the engine clock's current time.
    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        let now = self.clock.now();
        self.state().map_or(Duration::ZERO, |s| s.time_remaining(now))
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        let now = self.clock.now();
        self.session
            .as_ref()
            .map(|s| MatchSnapshot::capture(&s.state, &s.players, now))
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("listeners", &self.listeners)
            .field("session", &self.session)
            .finish()
    }
}
