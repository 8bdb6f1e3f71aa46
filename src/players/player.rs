//! Per-round submission state for one side.
//!
//! A `Player` is either interactive (gestures arrive from outside through a
//! key binding) or autonomous (gestures come from the decision engine). The
//! shared part enforces submit-once per round.

use crate::ai::{Decision, DecisionConfig, DecisionEngine, OpponentHistory};
use crate::core::{Difficulty, GameRng, Gesture, Side};
use crate::error::SubmitError;
use crate::input::KeyBindings;

/// State carried by the computer side across rounds.
#[derive(Clone, Debug)]
pub struct ComputerBrain {
    engine: DecisionEngine,
    history: OpponentHistory,
    rng: GameRng,
}

impl ComputerBrain {
    #[must_use]
    pub fn new(difficulty: Difficulty, config: DecisionConfig, rng: GameRng) -> Self {
        Self {
            engine: DecisionEngine::with_config(difficulty, config),
            history: OpponentHistory::new(),
            rng,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    #[must_use]
    pub fn history(&self) -> &OpponentHistory {
        &self.history
    }

    fn decide(&mut self) -> Decision {
        self.engine.decide(&self.history, &mut self.rng)
    }
}

/// Explicit discriminant checked by the engine.
#[derive(Clone, Debug)]
pub enum PlayerKind {
    Interactive(KeyBindings),
    Autonomous(ComputerBrain),
}

/// One side of a match.
#[derive(Clone, Debug)]
pub struct Player {
    side: Side,
    name: String,
    gesture: Option<Gesture>,
    submitted: bool,
    kind: PlayerKind,
}

impl Player {
    #[must_use]
    pub fn interactive(side: Side, name: impl Into<String>, bindings: KeyBindings) -> Self {
        Self::with_kind(side, name, PlayerKind::Interactive(bindings))
    }

    #[must_use]
    pub fn autonomous(side: Side, name: impl Into<String>, brain: ComputerBrain) -> Self {
        Self::with_kind(side, name, PlayerKind::Autonomous(brain))
    }

    fn with_kind(side: Side, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            side,
            name: name.into(),
            gesture: None,
            submitted: false,
            kind,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.kind, PlayerKind::Interactive(_))
    }

    #[must_use]
    pub fn has_submitted(&self) -> bool {
        self.submitted
    }

    /// The committed gesture for this round, hidden or not.
    ///
    /// Presentation code should go through the engine snapshot, which only
    /// reveals gestures once the round is resolved.
    #[must_use]
    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    #[must_use]
    pub fn bindings(&self) -> Option<&KeyBindings> {
        match &self.kind {
            PlayerKind::Interactive(bindings) => Some(bindings),
            PlayerKind::Autonomous(_) => None,
        }
    }

    #[must_use]
    pub fn brain(&self) -> Option<&ComputerBrain> {
        match &self.kind {
            PlayerKind::Interactive(_) => None,
            PlayerKind::Autonomous(brain) => Some(brain),
        }
    }

    // === Submission ===

    /// Commit a gesture for this round.
    ///
    /// Rejected once anything has been committed; the stored gesture stays.
    pub fn submit(&mut self, gesture: Gesture) -> Result<(), SubmitError> {
        if self.submitted {
            return Err(SubmitError::DuplicateSubmission { side: self.side });
        }
        self.gesture = Some(gesture);
        self.submitted = true;
        Ok(())
    }

    /// Translate a symbol through the key binding and commit it.
    pub fn submit_symbol(&mut self, symbol: char) -> Result<Gesture, SubmitError> {
        let gesture = self
            .bindings()
            .and_then(|bindings| bindings.gesture_for(symbol))
            .ok_or(SubmitError::UnmappedInput { symbol })?;
        self.submit(gesture)?;
        Ok(gesture)
    }

    /// Compute a gesture without committing it.
    ///
    /// Interactive players never choose on their own and yield `None`.
    pub fn make_choice(&mut self) -> Option<Decision> {
        match &mut self.kind {
            PlayerKind::Interactive(_) => None,
            PlayerKind::Autonomous(brain) => Some(brain.decide()),
        }
    }

    /// Feed the opponent's revealed gesture into the computer's history.
    pub fn observe_opponent(&mut self, gesture: Gesture) {
        if let PlayerKind::Autonomous(brain) = &mut self.kind {
            brain.history.push(gesture);
        }
    }

    // === Resets ===

    /// Clear this round's gesture and submission flag.
    pub fn reset_for_round(&mut self) {
        self.gesture = None;
        self.submitted = false;
    }

    /// Clear everything carried across rounds as well.
    pub fn reset_for_match(&mut self) {
        self.reset_for_round();
        if let PlayerKind::Autonomous(brain) = &mut self.kind {
            brain.history.clear();
        }
    }
}
