//! # Broadcaster: one producer, many independently paced consumers.
//!
//! The [`Broadcaster`] owns the replay buffer and the subscriber registry behind a
//! single mutex. Every public operation takes that mutex for a short, non-awaiting
//! critical section.
//!
//! ## Critical sections
//! ```text
//! publish(v):                         subscribe():
//!   lock ─┐                             lock ─┐
//!         ├─► buffer.retain(&v)               ├─► replay buffer into new sink
//!         ├─► registry.fan_out(&v)            ├─► registry.insert(id, sink)
//!   unlock┘                             unlock┘
//! ```
//! Because both steps of each operation share one lock acquisition, a publish that
//! races a subscribe is either part of the replay or delivered live, exactly once.
//!
//! ## Lifecycle
//! ```text
//! Subscription dropped ──► Weak<Shared>::upgrade ──► lock ──► registry.remove(id)
//! last Broadcaster dropped ──► Shared::drop ──► every sink closed ──► streams end
//! Broadcaster::close() ──► same as above, while handles are still alive
//! ```
//!
//! ## Example
//! ```rust
//! use futures::StreamExt;
//! use replaycast::{Broadcaster, RetentionPolicy};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let prices = Broadcaster::new(RetentionPolicy::RetainNewest(2));
//!     prices.publish("a");
//!     prices.publish("b");
//!     prices.publish("c");
//!
//!     let mut sub = prices.subscribe();
//!     assert_eq!(sub.next().await, Some("b"));
//!     assert_eq!(sub.next().await, Some("c"));
//!
//!     prices.publish("d");
//!     assert_eq!(sub.next().await, Some("d"));
//!     assert_eq!(prices.last_value(), Some("d"));
//! }
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{buffer::ReplayBuffer, builder::BroadcasterBuilder, registry::Registry};
use crate::{
    core::BroadcasterConfig,
    policies::RetentionPolicy,
    subscribers::{Subscribe, SubscriberHandle},
    subscription::{Subscription, SubscriptionId},
};

/// State guarded by the broadcaster's mutex.
struct State<T> {
    buffer: ReplayBuffer<T>,
    registry: Registry<T>,
    closed: bool,
}

/// Shared core behind every [`Broadcaster`] handle.
///
/// Subscriptions only hold a `Weak` to it, so consumers never keep a broadcaster alive.
pub(crate) struct Shared<T> {
    label: Arc<str>,
    policy: RetentionPolicy,
    state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    /// Removes `id` from the registry (called from the subscription's drop hook).
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        let (removed, remaining) = {
            let mut state = self.state.lock();
            let removed = state.registry.remove(id);
            (removed, state.registry.len())
        };
        if removed {
            tracing::debug!(label = %self.label, subscription = %id, remaining, "unsubscribed");
        }
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        let closed = self.state.get_mut().registry.close_all();
        if closed > 0 {
            tracing::debug!(label = %self.label, closed, "broadcaster dropped; subscriptions closed");
        }
    }
}

/// Multicast broadcaster with a replay buffer.
///
/// Cheap to clone: every clone is a handle to the same buffer and registry.
/// Teardown happens when the last handle is dropped (or on [`Broadcaster::close`]).
///
/// ### Properties
/// - **Non-blocking**: `publish()` never waits on consumers; sinks are unbounded.
/// - **Per-subscriber order**: each subscriber sees values in publish order, no gaps, no duplicates.
/// - **Gap-free replay**: retained values are replayed before any live value.
/// - **Infallible**: no operation returns an error; the lock cannot be poisoned.
pub struct Broadcaster<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Broadcaster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("label", &self.shared.label)
            .field("policy", &self.shared.policy)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> Broadcaster<T> {
    /// Creates a broadcaster with the given retention policy and an empty buffer.
    pub fn new(policy: RetentionPolicy) -> Self {
        Self::from_config(BroadcasterConfig::default().with_policy(policy), None)
    }

    /// Creates a broadcaster whose buffer is seeded with `initial`.
    ///
    /// An immediate first subscriber observes the seed as "last known state"
    /// without a prior publish (unless the policy retains nothing).
    pub fn with_initial(policy: RetentionPolicy, initial: T) -> Self {
        Self::from_config(BroadcasterConfig::default().with_policy(policy), Some(initial))
    }

    /// Creates a broadcaster from a full configuration.
    pub fn from_config(cfg: BroadcasterConfig, initial: Option<T>) -> Self {
        let mut buffer = ReplayBuffer::new(cfg.policy);
        if let Some(value) = initial {
            buffer.retain(&value);
        }

        Self {
            shared: Arc::new(Shared {
                label: cfg.label,
                policy: cfg.policy,
                state: Mutex::new(State {
                    buffer,
                    registry: Registry::new(),
                    closed: false,
                }),
            }),
        }
    }

    /// Returns a builder starting from [`BroadcasterConfig::default`].
    pub fn builder() -> BroadcasterBuilder<T> {
        BroadcasterBuilder::new(BroadcasterConfig::default())
    }

    /// Publishes a value to the replay buffer and every current subscriber.
    ///
    /// - Takes ownership of the value; each sink receives its own clone.
    /// - Returns immediately regardless of how far behind subscribers are.
    /// - After [`close`](Self::close) the value is dropped.
    pub fn publish(&self, value: T) {
        let mut state = self.shared.state.lock();
        if state.closed {
            drop(state);
            tracing::trace!(label = %self.shared.label, "publish after close ignored");
            return;
        }

        state.buffer.retain(&value);
        let (delivered, pruned) = state.registry.fan_out(&value);
        drop(state);

        if pruned > 0 {
            tracing::debug!(label = %self.shared.label, pruned, "pruned closed subscriptions");
        }
        tracing::trace!(label = %self.shared.label, delivered, "published");
    }

    /// Creates a new subscription.
    ///
    /// The retained values are replayed into the subscription (oldest first) and
    /// the subscription is registered inside the same critical section, so the
    /// sequence is `replay ++ live` with no gap and no duplicate.
    ///
    /// On a closed broadcaster the returned subscription has already ended.
    pub fn subscribe(&self) -> Subscription<T> {
        let id = SubscriptionId::next();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut state = self.shared.state.lock();
        if state.closed {
            drop(state);
            tracing::debug!(label = %self.shared.label, subscription = %id, "subscribed after close");
            return Subscription::new(id, rx, Weak::new());
        }

        let replayed = state.buffer.len();
        for value in state.buffer.iter() {
            // The receiver is held right here, so the send cannot fail.
            let _ = tx.send(value.clone());
        }
        state.registry.prune();
        state.registry.insert(id, tx);
        let subscribers = state.registry.len();
        drop(state);

        tracing::debug!(
            label = %self.shared.label,
            subscription = %id,
            replayed,
            subscribers,
            "subscribed"
        );
        Subscription::new(id, rx, Arc::downgrade(&self.shared))
    }

    /// Returns the most recently retained value, if any.
    pub fn last_value(&self) -> Option<T> {
        self.shared.state.lock().buffer.last().cloned()
    }

    /// Returns a snapshot of the replay buffer (oldest first).
    pub fn retained(&self) -> Vec<T> {
        self.shared.state.lock().buffer.to_vec()
    }
}

impl<T: Clone + Send + Sync + 'static> Broadcaster<T> {
    /// Subscribes a push-style [`Subscribe`] implementation.
    ///
    /// Spawns a tokio worker that drains a fresh subscription (replay included) and
    /// calls [`Subscribe::on_event`] for every value in order. Must be called from
    /// within a tokio runtime.
    pub fn subscribe_with(&self, subscriber: Arc<dyn Subscribe<T>>) -> SubscriberHandle {
        SubscriberHandle::spawn(self.subscribe(), subscriber)
    }
}

impl<T> Broadcaster<T> {
    /// True if at least one subscription is registered right now.
    ///
    /// A hint, not a guarantee: the answer can go stale as soon as it is returned.
    /// Subscriptions whose consumer is gone are pruned first.
    pub fn has_subscribers(&self) -> bool {
        let mut state = self.shared.state.lock();
        state.registry.prune();
        !state.registry.is_empty()
    }

    /// Number of registered subscriptions (same caveats as [`has_subscribers`](Self::has_subscribers)).
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.shared.state.lock();
        state.registry.prune();
        state.registry.len()
    }

    /// Retention policy fixed at construction.
    #[inline]
    pub fn policy(&self) -> RetentionPolicy {
        self.shared.policy
    }

    /// Label attached to log records.
    #[inline]
    pub fn label(&self) -> &str {
        &self.shared.label
    }

    /// Tears the broadcaster down while handles are still alive.
    ///
    /// Every live subscription ends once it has drained what was already queued.
    /// Later `publish` calls are ignored and later `subscribe` calls return an
    /// already-ended subscription. The replay buffer stays readable through
    /// [`last_value`](Self::last_value). Idempotent.
    pub fn close(&self) {
        let closed = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            state.registry.close_all()
        };
        tracing::debug!(label = %self.shared.label, closed, "broadcaster closed");
    }

    /// True once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TryRecvError;

    #[test]
    fn test_replay_then_live() {
        let b = Broadcaster::new(RetentionPolicy::RetainNewest(2));
        for v in ["a", "b", "c"] {
            b.publish(v);
        }

        let mut sub = b.subscribe();
        assert_eq!(sub.try_recv(), Ok("b"));
        assert_eq!(sub.try_recv(), Ok("c"));
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));

        b.publish("d");
        assert_eq!(sub.try_recv(), Ok("d"));
        assert_eq!(b.last_value(), Some("d"));
    }

    #[test]
    fn test_oldest_replays_first_values_but_delivers_live() {
        let b = Broadcaster::new(RetentionPolicy::RetainOldest(2));
        let mut early = b.subscribe();
        for v in 1..=4u32 {
            b.publish(v);
        }
        assert_eq!(b.retained(), vec![1, 2]);
        assert_eq!(b.last_value(), Some(2));

        let got: Vec<u32> = std::iter::from_fn(|| early.try_recv().ok()).collect();
        assert_eq!(got, vec![1, 2, 3, 4]);

        let mut late = b.subscribe();
        assert_eq!(late.try_recv(), Ok(1));
        assert_eq!(late.try_recv(), Ok(2));
        assert_eq!(late.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_initial_value_is_replayed() {
        let b = Broadcaster::with_initial(RetentionPolicy::latest(), "offline");
        let mut sub = b.subscribe();
        assert_eq!(sub.try_recv(), Ok("offline"));
        assert_eq!(b.last_value(), Some("offline"));
    }

    #[test]
    fn test_drop_subscription_unregisters() {
        let b = Broadcaster::<u32>::new(RetentionPolicy::events());
        let sub = b.subscribe();
        assert!(b.has_subscribers());
        assert_eq!(b.subscriber_count(), 1);
        drop(sub);
        assert!(!b.has_subscribers());
        b.publish(1);
    }

    #[test]
    fn test_close_ends_subscriptions_and_ignores_publish() {
        let b = Broadcaster::new(RetentionPolicy::latest());
        b.publish(1u32);
        let mut sub = b.subscribe();
        b.close();
        b.close();

        assert!(b.is_closed());
        assert!(!b.has_subscribers());
        assert_eq!(sub.try_recv(), Ok(1));
        assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));

        b.publish(2);
        assert_eq!(b.last_value(), Some(1));

        let mut after = b.subscribe();
        assert_eq!(after.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_drop_last_handle_closes_subscriptions() {
        let b = Broadcaster::<u32>::new(RetentionPolicy::events());
        let clone = b.clone();
        let mut sub = b.subscribe();

        drop(b);
        clone.publish(5);
        assert_eq!(sub.try_recv(), Ok(5));

        drop(clone);
        assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_debug_shows_label() {
        let b = Broadcaster::<u8>::builder().label("ticks").build();
        assert!(format!("{b:?}").contains("ticks"));
    }
}
