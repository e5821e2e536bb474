//! # Consumer side of a broadcaster.
//!
//! A [`Subscription`] is a lazy, potentially infinite, consumer-owned sequence of
//! values. It ends when the broadcaster is torn down; the consumer cancels it by
//! dropping it.
//!
//! ## Architecture
//! ```text
//! Broadcaster ──► [unbounded sink] ──► Subscription ──► recv() / Stream::next()
//!      ▲                                    │
//!      └──────── Weak<Shared> ◄─────────────┘ (drop hook: unregister id)
//! ```
//!
//! ## Rules
//! - Values arrive in publish order, replay first.
//! - Dropping the subscription unregisters it; no explicit unsubscribe call is needed.
//! - The back-reference is non-owning: a subscription never keeps its broadcaster alive.
//! - Timeouts are the caller's business: race `recv()` against `tokio::time::timeout`.

use std::fmt;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use super::SubscriptionId;
use crate::core::Shared;
use crate::error::TryRecvError;

/// One consumer's ordered view of a broadcaster.
pub struct Subscription<T> {
    id: SubscriptionId,
    rx: mpsc::UnboundedReceiver<T>,
    owner: Weak<Shared<T>>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(
        id: SubscriptionId,
        rx: mpsc::UnboundedReceiver<T>,
        owner: Weak<Shared<T>>,
    ) -> Self {
        Self { id, rx, owner }
    }

    /// Identifier of this subscription.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next value.
    ///
    /// Returns `None` once the broadcaster has been torn down and every queued
    /// value was consumed.
    ///
    /// Cancel safe: dropping the future never loses a value.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Takes the next queued value without waiting.
    ///
    /// # Errors
    /// - [`TryRecvError::Empty`] if nothing is queued yet.
    /// - [`TryRecvError::Closed`] if the broadcaster is gone and the queue is drained.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.rx.try_recv().map_err(|e| match e {
            mpsc::error::TryRecvError::Empty => TryRecvError::Empty,
            mpsc::error::TryRecvError::Disconnected => TryRecvError::Closed,
        })
    }

    /// Number of values queued and not yet consumed.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Stops consuming; equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.rx.close();
        if let Some(owner) = self.owner.upgrade() {
            owner.unsubscribe(self.id);
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pending", &self.rx.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use crate::{Broadcaster, RetentionPolicy};

    #[tokio::test]
    async fn test_stream_yields_replay_then_ends_on_close() {
        let b = Broadcaster::new(RetentionPolicy::RetainAll);
        b.publish(1u32);
        b.publish(2);
        let sub = b.subscribe();
        b.publish(3);
        b.close();

        let got: Vec<u32> = sub.collect().await;
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_pending_counts_undrained_values() {
        let b = Broadcaster::new(RetentionPolicy::events());
        let mut sub = b.subscribe();
        for v in 0..5u32 {
            b.publish(v);
        }
        assert_eq!(sub.pending(), 5);
        assert_eq!(sub.recv().await, Some(0));
        assert_eq!(sub.pending(), 4);
    }

    #[test]
    fn test_unsubscribe_removes_registration() {
        let b = Broadcaster::<u32>::new(RetentionPolicy::events());
        let sub = b.subscribe();
        let other = b.subscribe();
        assert_ne!(sub.id(), other.id());
        sub.unsubscribe();
        assert_eq!(b.subscriber_count(), 1);
    }
}
