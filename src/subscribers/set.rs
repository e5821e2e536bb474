//! # SubscriberSet: several push subscribers on one broadcaster
//!
//! [`SubscriberSet`] attaches a group of [`Subscribe`] implementations to the same
//! broadcaster and stops them together.
//!
//! ## What it guarantees
//! - Every subscriber gets its own subscription and worker.
//! - Per-subscriber FIFO (publish order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No ordering across different subscribers.
//!
//! ## Diagram
//! ```text
//!    publish(v)
//!        │
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```

use std::sync::Arc;

use super::{Subscribe, SubscriberHandle};
use crate::core::Broadcaster;

/// Group of subscriber workers managed as one unit.
#[derive(Default)]
pub struct SubscriberSet {
    handles: Vec<SubscriberHandle>,
}

impl SubscriberSet {
    /// Attaches every subscriber to `broadcaster`, spawning one worker each.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn attach<T>(broadcaster: &Broadcaster<T>, subs: Vec<Arc<dyn Subscribe<T>>>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let handles = subs
            .into_iter()
            .map(|sub| broadcaster.subscribe_with(sub))
            .collect();
        Self { handles }
    }

    /// Adds an already running worker to the set.
    pub fn push(&mut self, handle: SubscriberHandle) {
        self.handles.push(handle);
    }

    /// Names of the subscribers in attach order.
    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(SubscriberHandle::name).collect()
    }

    /// Graceful shutdown: cancel all workers and await their completion.
    pub async fn shutdown(self) {
        for h in &self.handles {
            h.cancel();
        }
        for h in self.handles {
            h.join().await;
        }
    }

    /// Waits for every worker to exit on its own (after broadcaster teardown).
    pub async fn join(self) {
        for h in self.handles {
            h.join().await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }
}
