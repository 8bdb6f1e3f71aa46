//! Engine notifications and listener registration.
//!
//! The engine emits exactly five kinds of notification, in the order the
//! underlying transitions happen. Listeners are called synchronously, in
//! registration order, after the engine has finished mutating its state.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameMode, Gesture, Side, Tally};

use super::outcome::RoundReport;

/// A notification for presentation code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A match was set up (or reset) and is ready for its first round.
    MatchInitialized { mode: GameMode, max_rounds: u32 },

    /// A round opened for input.
    RoundStarted { round: u32 },

    /// An interactive side committed a gesture.
    GestureSubmitted { side: Side, gesture: Gesture },

    /// A round was scored.
    RoundResult(RoundReport),

    /// The match is over.
    MatchEnded { winner: Option<Side>, tally: Tally },
}

/// Payload-free discriminant, handy for asserting emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MatchInitialized,
    RoundStarted,
    GestureSubmitted,
    RoundResult,
    MatchEnded,
}

impl EngineEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::MatchInitialized { .. } => EventKind::MatchInitialized,
            EngineEvent::RoundStarted { .. } => EventKind::RoundStarted,
            EngineEvent::GestureSubmitted { .. } => EventKind::GestureSubmitted,
            EngineEvent::RoundResult(_) => EventKind::RoundResult,
            EngineEvent::MatchEnded { .. } => EventKind::MatchEnded,
        }
    }
}

/// Receives engine notifications.
pub trait EngineListener {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EngineListener for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event);
    }
}

/// Forwards every event into an `mpsc` channel.
///
/// A disconnected receiver is ignored.
#[derive(Clone, Debug)]
pub struct ChannelListener(pub Sender<EngineEvent>);

impl EngineListener for ChannelListener {
    fn on_event(&mut self, event: &EngineEvent) {
        let _ = self.0.send(event.clone());
    }
}

/// Records every event. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Kinds of everything recorded so far.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(EngineEvent::kind).collect()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<EngineEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EngineListener for EventLog {
    fn on_event(&mut self, event: &EngineEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Handle returned by registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type BoxedListener = Box<dyn EngineListener + Send>;

/// Ordered set of listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u32,
    listeners: SmallVec<[(ListenerId, BoxedListener); 4]>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl EngineListener + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver one event to every listener in registration order.
    pub fn emit(&mut self, event: &EngineEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_event(event);
        }
    }

    /// Deliver a batch of events, each to every listener, in order.
    pub fn emit_all(&mut self, events: impl IntoIterator<Item = EngineEvent>) {
        for event in events {
            self.emit(&event);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
