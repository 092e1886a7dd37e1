/// Event bus for synchronous pub/sub
///
/// Observers register per event kind and are called in registration order,
/// inside the command that produced the event, before that command returns.
use crossbeam_channel::{unbounded, Receiver};
use std::collections::HashMap;
use std::fmt;

use super::events::{EventKind, TourEvent};
use crate::tour::TourState;

/// Observer callback: the event plus a read-only view of state at emission time
pub type Callback = Box<dyn FnMut(&TourEvent, &TourState) + Send>;

/// Handle returned by `subscribe`, used to revoke the subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Event subscriber
struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

/// Per-kind fan-out to registered observers
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<Subscriber>>,
    next_id: usize,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register `callback` for `kind`; multiple callbacks per kind are allowed
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&TourEvent, &TourState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.subscribers.entry(kind).or_default().push(Subscriber {
            id,
            callback: Box::new(callback),
        });

        tracing::trace!(kind = %kind, id = id.0, "Observer subscribed");
        id
    }

    /// Subscribe with a channel, for observers that live on another thread
    pub fn subscribe_channel(&mut self, kind: EventKind) -> (Receiver<TourEvent>, SubscriptionId) {
        let (tx, rx) = unbounded();

        let id = self.subscribe(kind, move |event, _state| {
            // If send fails, receiver was dropped - that's ok
            let _ = tx.send(event.clone());
        });

        (rx, id)
    }

    /// Revoke a subscription. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for subscribers in self.subscribers.values_mut() {
            if let Some(pos) = subscribers.iter().position(|s| s.id == id) {
                subscribers.remove(pos);
                tracing::trace!(id = id.0, "Observer unsubscribed");
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every observer of its kind, in registration order
    pub fn publish(&mut self, event: &TourEvent, state: &TourState) {
        let Some(subscribers) = self.subscribers.get_mut(&event.kind()) else {
            return;
        };

        for subscriber in subscribers.iter_mut() {
            (subscriber.callback)(event, state);
        }
    }

    /// Get number of observers for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    /// Get number of observers across all kinds
    pub fn total_subscribers(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }

    /// Clear all subscribers
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<EventKind, usize> = self
            .subscribers
            .iter()
            .map(|(kind, subs)| (*kind, subs.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("subscribers", &counts)
            .field("next_id", &self.next_id)
            .finish()
    }
}
