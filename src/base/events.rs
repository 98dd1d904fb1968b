//! Publish/subscribe registry.
//!
//! Listeners are invoked synchronously, in registration order, with the
//! event and a shared reference to the publishing context. Subscribing
//! hands back a [`SubscriptionId`]; nothing is ever unsubscribed
//! implicitly.

use std::fmt;

/// Handle returned by [`EventEmitter::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<E, C> = Box<dyn FnMut(&E, &C)>;

/// Registry of listeners for events of type `E` published by a `C`.
pub struct EventEmitter<E, C> {
    listeners: Vec<(SubscriptionId, Listener<E, C>)>,
    next_id: u64,
}

impl<E, C> EventEmitter<E, C> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&E, &C) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn emit(&mut self, event: &E, context: &C) {
        for (_, listener) in &mut self.listeners {
            listener(event, context);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E, C> Default for EventEmitter<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> fmt::Debug for EventEmitter<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
