//! # Subscriber registry.
//!
//! Maps each live [`SubscriptionId`] to the write end of its delivery sink.
//!
//! ## Architecture
//! ```text
//! Broadcaster::publish(v)
//!     └─► Registry::fan_out(&v)
//!            ├─► sink[sub-1].send(v.clone())
//!            ├─► sink[sub-2].send(v.clone())   (receiver gone → entry pruned)
//!            └─► sink[sub-N].send(v.clone())
//! ```
//!
//! ## Rules
//! - Sinks are **unbounded**: `send` never waits, a stalled consumer only grows its own queue.
//! - The registry is not synchronized itself; the broadcaster's lock guards it.
//! - Entries whose receiver was dropped are removed the next time the registry is touched.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::subscription::SubscriptionId;

/// Live subscriptions keyed by id.
#[derive(Debug)]
pub(crate) struct Registry<T> {
    sinks: HashMap<SubscriptionId, mpsc::UnboundedSender<T>>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            sinks: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, id: SubscriptionId, sink: mpsc::UnboundedSender<T>) {
        let prev = self.sinks.insert(id, sink);
        debug_assert!(prev.is_none(), "subscription id {id} reused");
    }

    /// Returns `true` if `id` was registered.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        self.sinks.remove(&id).is_some()
    }

    /// Drops entries whose receiver is gone. Returns how many were removed.
    pub(crate) fn prune(&mut self) -> usize {
        let before = self.sinks.len();
        self.sinks.retain(|_, sink| !sink.is_closed());
        before - self.sinks.len()
    }

    /// Closes every sink by dropping its sender. Returns how many were closed.
    pub(crate) fn close_all(&mut self) -> usize {
        let n = self.sinks.len();
        self.sinks.clear();
        n
    }

    pub(crate) fn len(&self) -> usize {
        self.sinks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl<T: Clone> Registry<T> {
    /// Pushes a clone of `value` into every sink.
    ///
    /// Returns `(delivered, pruned)`.
    pub(crate) fn fan_out(&mut self, value: &T) -> (usize, usize) {
        let before = self.sinks.len();
        self.sinks.retain(|_, sink| sink.send(value.clone()).is_ok());
        let delivered = self.sinks.len();
        (delivered, before - delivered)
    }
}
