//! # Broadcaster configuration.
//!
//! Provides [`BroadcasterConfig`] centralized settings for one broadcaster.
//!
//! Config is used in two ways:
//! 1. **Direct construction**: `Broadcaster::from_config(config, initial)`
//! 2. **Builder defaults**: `BroadcasterBuilder::new(config)`
//!
//! ## Presets
//! - [`BroadcasterConfig::events`] → `RetainNewest(0)`, no replay
//! - [`BroadcasterConfig::latest`] → `RetainNewest(1)`, last known state

use std::sync::Arc;

use crate::policies::RetentionPolicy;

/// Configuration for a single broadcaster.
///
/// ## Field semantics
/// - `policy`: retention policy for the replay buffer (fixed for the broadcaster's lifetime)
/// - `label`: name attached to every log record emitted by the broadcaster
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcasterConfig {
    /// Which published values are kept for late subscribers.
    pub policy: RetentionPolicy,

    /// Name used in `tracing` records (`label` field).
    pub label: Arc<str>,
}

impl BroadcasterConfig {
    /// Pure event stream: no replay.
    pub fn events() -> Self {
        Self::default().with_policy(RetentionPolicy::events())
    }

    /// State-like stream: replay the most recent value.
    pub fn latest() -> Self {
        Self::default().with_policy(RetentionPolicy::latest())
    }

    /// Replaces the retention policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the log label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = label.into();
        self
    }
}

impl Default for BroadcasterConfig {
    /// Default configuration:
    ///
    /// - `policy = RetainNewest(0)` (no replay)
    /// - `label = "broadcaster"`
    fn default() -> Self {
        Self {
            policy: RetentionPolicy::default(),
            label: Arc::from("broadcaster"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(BroadcasterConfig::events().policy, RetentionPolicy::RetainNewest(0));
        assert_eq!(BroadcasterConfig::latest().policy, RetentionPolicy::RetainNewest(1));
        assert_eq!(&*BroadcasterConfig::default().label, "broadcaster");
    }

    #[test]
    fn test_with_label() {
        let cfg = BroadcasterConfig::latest().with_label("connectivity");
        assert_eq!(&*cfg.label, "connectivity");
        assert_eq!(cfg.policy, RetentionPolicy::latest());
    }
}
