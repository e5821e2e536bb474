//! Broadcaster core: shared state and its lock discipline.
//!
//! The only public API from this module is [`Broadcaster`] plus its
//! construction helpers ([`BroadcasterConfig`], [`BroadcasterBuilder`]).
//!
//! Internal modules:
//! - [`buffer`]: replay buffer trimmed by the retention policy;
//! - [`registry`]: subscription id → unbounded sink, fan-out and pruning;
//! - [`broadcaster`]: the single mutex over `(buffer, registry)` and the public operations;
//! - [`builder`] / [`config`]: construction surface.

mod broadcaster;
mod buffer;
mod builder;
mod config;
mod registry;

pub use broadcaster::Broadcaster;
pub(crate) use broadcaster::Shared;
pub use builder::BroadcasterBuilder;
pub use config::BroadcasterConfig;
