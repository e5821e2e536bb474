//! # Push-style subscribers.
//!
//! This module provides the [`Subscribe`] trait and the machinery that drives it:
//! a dedicated tokio worker per subscriber that drains an ordinary
//! [`Subscription`](crate::Subscription).
//!
//! ## Architecture
//! ```text
//! Value flow:
//!   producer ── publish(v) ──► Broadcaster ──► one Subscription per subscriber
//!                                                │
//!                                                ├──► worker ──► Subscribe::on_event(&v)
//!                                                │         ┌────┴────┬─────────┐
//!                                                │         ▼         ▼         ▼
//!                                                │     LogWriter  Metrics   Custom
//!                                                │
//!                                                └──► SubscriberHandle (cancel / join)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use replaycast::{Broadcaster, RetentionPolicy, Subscribe};
//!
//! struct Alerts;
//!
//! #[async_trait]
//! impl Subscribe<String> for Alerts {
//!     async fn on_event(&self, msg: &String) {
//!         // forward to a pager, etc.
//!         let _ = msg;
//!     }
//! }
//!
//! # async fn run() {
//! let b = Broadcaster::<String>::new(RetentionPolicy::events());
//! let handle = b.subscribe_with(Arc::new(Alerts));
//! b.publish("disk full".to_string());
//! handle.shutdown().await;
//! # }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;
mod worker;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
pub use worker::SubscriberHandle;
