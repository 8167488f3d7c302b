//! Input Subscription Registry
//!
//! Behaviors install handlers for specific input events in their enter hook
//! and remove them in their exit hook. The registry records who listens to
//! what so the controller can deliver an event only to a behavior that is
//! both active and subscribed.
//!
//! Subscribing twice or unsubscribing something that was never installed
//! means the enter/exit pairing is broken, and panics.

use crate::player::BehaviorKind;

use super::InputEventKind;

/// One installed handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub owner: BehaviorKind,
    pub event: InputEventKind,
}

/// Live input subscriptions.
#[derive(Debug, Clone, Default)]
pub struct InputSubscriptions {
    live: Vec<Subscription>,
}

impl InputSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler for `event` owned by `owner`.
    ///
    /// # Panics
    /// If the same owner already listens to `event`.
    pub fn subscribe(&mut self, owner: BehaviorKind, event: InputEventKind) {
        let subscription = Subscription { owner, event };
        assert!(
            !self.live.contains(&subscription),
            "{owner:?} subscribed to {event:?} twice"
        );
        self.live.push(subscription);
    }

    /// Remove the handler for `event` owned by `owner`.
    ///
    /// # Panics
    /// If no such handler is installed.
    pub fn unsubscribe(&mut self, owner: BehaviorKind, event: InputEventKind) {
        let subscription = Subscription { owner, event };
        let index = self
            .live
            .iter()
            .position(|live| *live == subscription)
            .unwrap_or_else(|| panic!("{owner:?} unsubscribed from {event:?} without subscribing"));
        self.live.swap_remove(index);
    }

    pub fn is_subscribed(&self, owner: BehaviorKind, event: InputEventKind) -> bool {
        self.live.contains(&Subscription { owner, event })
    }

    /// Owners currently listening to `event`.
    pub fn subscribers(&self, event: InputEventKind) -> impl Iterator<Item = BehaviorKind> + '_ {
        self.live
            .iter()
            .filter(move |live| live.event == event)
            .map(|live| live.owner)
    }

    /// Number of installed handlers.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
