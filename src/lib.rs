//! # replaycast
//!
//! **replaycast** is an in-process multicast broadcaster for Rust.
//!
//! A single logical producer publishes values of one element type; any number of
//! independent consumers, joining and leaving at any time, each receive their own
//! ordered view of those values. Consumers never block the producer or each other.
//! A configurable replay buffer lets late subscribers catch up on retained history.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  producer #1 │   │  producer #2 │   │  producer #3 │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ publish(v)       │                  │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Broadcaster<T>  (one parking_lot::Mutex)                         │
//! │  - ReplayBuffer (trimmed by RetentionPolicy)                      │
//! │  - Registry     (SubscriptionId → unbounded sink)                 │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!    [sink sub-1]       [sink sub-2]       [sink sub-N]     (unbounded, per subscriber)
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//!   Subscription       Subscription       Subscription ──► SubscriberHandle worker
//!   (Stream / recv)    (Stream / recv)                      └─► Subscribe::on_event
//! ```
//!
//! ### Lifecycle
//! ```text
//! subscribe()  ──► lock ─► replay buffer into new sink ─► register ─► unlock
//! publish(v)   ──► lock ─► buffer.retain(v) ─► fan-out to every sink ─► unlock
//! drop(sub)    ──► Weak back-reference ─► lock ─► unregister ─► unlock
//! last handle dropped / close() ──► every sink closed ──► every stream ends
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------------|-------------------------------------------|
//! | **Broadcasting**  | Publish once, deliver to every current subscriber.              | [`Broadcaster`]                           |
//! | **Replay**        | Keep newest-n, oldest-n or all values for late subscribers.     | [`RetentionPolicy`]                       |
//! | **Consumption**   | Pull-style ordered sequences with cancellation on drop.         | [`Subscription`], [`SubscriptionId`]      |
//! | **Subscriber API**| Push-style handlers driven by dedicated workers.                | [`Subscribe`], [`SubscriberSet`]          |
//! | **Errors**        | Typed errors for the helper APIs.                               | [`ParsePolicyError`], [`TryRecvError`]    |
//! | **Configuration** | Centralized settings and a builder.                             | [`BroadcasterConfig`], [`BroadcasterBuilder`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use futures::StreamExt;
//! use replaycast::{Broadcaster, RetentionPolicy};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Connectivity { Online, Offline }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // State-like value: late subscribers should see the last known state.
//!     let net = Broadcaster::with_initial(RetentionPolicy::latest(), Connectivity::Offline);
//!
//!     let mut ui = net.subscribe();
//!     assert_eq!(ui.next().await, Some(Connectivity::Offline));
//!
//!     net.publish(Connectivity::Online);
//!     assert_eq!(ui.next().await, Some(Connectivity::Online));
//!
//!     // Timeouts are layered on by the caller.
//!     let idle = tokio::time::timeout(Duration::from_millis(10), ui.next()).await;
//!     assert!(idle.is_err());
//!
//!     drop(net); // teardown: every subscription ends
//!     assert_eq!(ui.next().await, None);
//! }
//! ```
mod core;
mod error;
mod policies;
mod subscribers;
mod subscription;

// ---- Public re-exports ----

pub use crate::core::{Broadcaster, BroadcasterBuilder, BroadcasterConfig};
pub use error::{ParsePolicyError, TryRecvError};
pub use policies::RetentionPolicy;
pub use subscribers::{Subscribe, SubscriberHandle, SubscriberSet};
pub use subscription::{Subscription, SubscriptionId};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
