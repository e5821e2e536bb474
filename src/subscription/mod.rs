//! Subscriptions: the consumer-owned end of a broadcaster.
//!
//! ## Contents
//! - [`Subscription`] ordered sequence of values (`recv`, `try_recv`, `futures::Stream`)
//! - [`SubscriptionId`] opaque, never-reused identifier

mod id;
#[allow(clippy::module_inception)]
mod subscription;

pub use id::SubscriptionId;
pub use subscription::Subscription;
