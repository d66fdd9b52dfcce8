//! Synchronous Signals for Decoupled Communication
//!
//! This module provides a typed observer registry that lets gameplay systems
//! publish state changes to presentation code (UI bars, animation, audio)
//! without knowing who listens.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each signal carries one payload type
//! - **Synchronous**: Subscribers run inside `emit()`, in subscription order
//! - **Explicit Handles**: `subscribe()` returns a handle used to unsubscribe
//!
//! # Example
//!
//! ```ignore
//! let mut health_changed: Signal<Gauge> = Signal::new();
//!
//! let handle = health_changed.subscribe(|gauge| {
//!     println!("health {}/{}", gauge.current, gauge.max);
//! });
//!
//! health_changed.emit(&Gauge { current: 70.0, max: 100.0 });
//! health_changed.unsubscribe(handle);
//! ```

use std::fmt;

// ============================================================================
// Signal
// ============================================================================

/// Handle identifying one subscription on a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Slot<T> = Box<dyn FnMut(&T)>;

/// Ordered list of callbacks invoked synchronously on `emit()`.
pub struct Signal<T> {
    next_id: u64,
    slots: Vec<(SubscriptionId, Slot<T>)>,
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }

    /// Register a callback. Callbacks fire in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback.
    ///
    /// Returns `true` if the handle was registered on this signal.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    /// Deliver a value to every subscriber.
    pub fn emit(&mut self, value: &T) {
        for (_, slot) in &mut self.slots {
            slot(value);
        }
    }

    /// Number of active subscriptions.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nobody is listening.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop all subscriptions.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Game flow notifications raised by the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameFlow {
    /// The simulation was paused.
    Paused,
    /// The simulation was resumed from a pause.
    Resumed,
}

/// Process-wide publish/subscribe hub for game flow signals.
///
/// Owned by the session and handed to whoever needs it; there is no global
/// instance.
#[derive(Debug, Default)]
pub struct EventBus {
    /// Fired when the game enters the paused state
    pub on_game_paused: Signal<()>,
    /// Fired when the game leaves the paused state
    pub on_game_resumed: Signal<()>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify subscribers that the game was paused.
    pub fn raise_game_paused(&mut self) {
        self.on_game_paused.emit(&());
    }

    /// Notify subscribers that the game was resumed.
    pub fn raise_game_resumed(&mut self) {
        self.on_game_resumed.emit(&());
    }

    /// Raise the signal matching `flow`.
    pub fn raise(&mut self, flow: GameFlow) {
        match flow {
            GameFlow::Paused => self.raise_game_paused(),
            GameFlow::Resumed => self.raise_game_resumed(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
