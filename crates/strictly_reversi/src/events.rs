//! Synchronous event channel between the engine and its observers.

use crate::types::{Color, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Something observers may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The board was built and seeded.
    GameStarted,
    /// The given colour is now to move.
    TurnChanged(Color),
    /// Disc counts may have changed.
    ScoreUpdated,
    /// Play ended for good: wipeout, full board, or two passes in a row.
    ///
    /// Published once per game, after the mutation that ended it.
    GameOver(Outcome),
}

/// Receives engine events.
pub trait GameListener {
    /// Called synchronously at each publication point.
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Ordered list of subscribers.
///
/// Cloning a bus yields an empty one: subscriptions belong to the live
/// game, never to copies made for analysis.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn GameListener>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber; it receives events after earlier ones.
    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Checks if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers an event to every subscriber in order.
    #[instrument(skip(self), fields(listeners = self.listeners.len()))]
    pub fn publish(&mut self, event: GameEvent) {
        trace!("Publishing event");
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
