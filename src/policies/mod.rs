//! Retention policies.
//!
//! This module groups the knob that controls **which** published values are kept
//! for replay to subscribers that join later.
//!
//! ## Contents
//! - [`RetentionPolicy`] newest-n / oldest-n / all
//!
//! ## Quick wiring
//! ```text
//! BroadcasterConfig { policy: RetentionPolicy, .. }
//!      └─► core::ReplayBuffer uses:
//!           - policy to decide whether a published value is kept
//!           - policy to decide which value is evicted
//! ```
//!
//! ## Defaults
//! - `RetentionPolicy::RetainNewest(0)`: no replay (pure event stream).

mod retention;

pub use retention::RetentionPolicy;
