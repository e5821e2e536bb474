//! # Push-style subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for reacting to published values
//! without writing a consume loop by hand.
//!
//! Each attached subscriber gets:
//! - **Its own subscription** (replay included, unbounded queue)
//! - **Dedicated worker task** (runs independently)
//! - **Panic isolation** (panics in `on_event` are caught and logged)
//!
//! ## Architecture
//! ```text
//! Broadcaster ──► Subscription ──► worker task ──► subscriber.on_event(&value)
//!                                              └─► panic caught → tracing::error!
//! ```
//!
//! ## Rules
//! - A slow subscriber only grows its own queue.
//! - Values are processed sequentially (FIFO) per subscriber.
//! - Subscribers do not block the publisher or each other.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use replaycast::Subscribe;
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Subscribe<u64> for Metrics {
//!     async fn on_event(&self, tick: &u64) {
//!         // export a metric, etc.
//!         let _ = tick;
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//! ```

use async_trait::async_trait;

/// Push-style consumer of a broadcaster's values.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe<T>: Send + Sync + 'static
where
    T: Send + Sync + 'static,
{
    /// Processes a single value.
    ///
    /// Called from a dedicated worker task, never in the publisher's context.
    /// Values are delivered in publish order.
    async fn on_event(&self, value: &T);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
