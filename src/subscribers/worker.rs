//! # Worker task driving one [`Subscribe`] implementation.
//!
//! ```text
//! spawn(subscription, subscriber)
//!   loop {
//!     select! {
//!       cancel token fired   ─► exit
//!       subscription.recv()  ─► Some(v) ─► on_event(&v) (panic caught)
//!                            └► None    ─► exit (broadcaster torn down)
//!     }
//!   }
//!   subscription dropped ─► unregistered from the broadcaster
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::Subscribe;
use crate::subscription::{Subscription, SubscriptionId};

/// Handle to a running subscriber worker.
///
/// Dropping the handle detaches the worker: it keeps running until the
/// broadcaster is torn down.
pub struct SubscriberHandle {
    name: &'static str,
    id: SubscriptionId,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl SubscriberHandle {
    pub(crate) fn spawn<T>(mut subscription: Subscription<T>, sub: Arc<dyn Subscribe<T>>) -> Self
    where
        T: Send + Sync + 'static,
    {
        let name = sub.name();
        let id = subscription.id();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    next = subscription.recv() => match next {
                        Some(value) => {
                            let fut = sub.on_event(&value);
                            if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                                tracing::error!(
                                    subscriber = name,
                                    subscription = %id,
                                    info = %panic_message(panic_err.as_ref()),
                                    "subscriber panicked"
                                );
                            }
                        }
                        None => break,
                    }
                }
            }
            drop(subscription);
            tracing::debug!(subscriber = name, subscription = %id, "subscriber worker stopped");
        });

        Self {
            name,
            id,
            cancel,
            join,
        }
    }

    /// Subscriber name (from [`Subscribe::name`]).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Id of the subscription the worker drains.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Asks the worker to stop; values still queued are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once the worker task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits until the worker exits on its own (after broadcaster teardown) or
    /// because it was cancelled.
    pub async fn join(self) {
        if let Err(e) = self.join.await {
            tracing::error!(subscriber = self.name, subscription = %self.id, error = %e, "subscriber worker failed");
        }
    }

    /// Cancels the worker and waits for it to exit.
    pub async fn shutdown(self) {
        self.cancel();
        self.join().await;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::{Broadcaster, RetentionPolicy};

    #[derive(Default)]
    struct Summer {
        total: AtomicU32,
        seen: AtomicU32,
    }

    #[async_trait]
    impl Subscribe<u32> for Summer {
        async fn on_event(&self, value: &u32) {
            self.seen.fetch_add(1, Ordering::SeqCst);
            if *value == 13 {
                panic!("unlucky");
            }
            self.total.fetch_add(*value, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "summer"
        }
    }

    #[tokio::test]
    async fn test_worker_drains_until_close_and_survives_panics() {
        let b = Broadcaster::with_initial(RetentionPolicy::latest(), 1u32);
        let summer = Arc::new(Summer::default());
        let handle = b.subscribe_with(summer.clone());
        assert_eq!(handle.name(), "summer");

        b.publish(13);
        b.publish(2);
        b.close();

        tokio::time::timeout(Duration::from_secs(5), handle.join())
            .await
            .expect("worker should stop after close");
        assert_eq!(summer.seen.load(Ordering::SeqCst), 3);
        assert_eq!(summer.total.load(Ordering::SeqCst), 3);
        assert!(!b.has_subscribers());
    }

    #[tokio::test]
    async fn test_shutdown_unregisters_subscription() {
        let b = Broadcaster::<u32>::new(RetentionPolicy::events());
        let handle = b.subscribe_with(Arc::new(Summer::default()));
        assert!(b.has_subscribers());

        handle.shutdown().await;
        assert!(!b.has_subscribers());
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
