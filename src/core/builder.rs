use std::sync::Arc;

use crate::{core::BroadcasterConfig, policies::RetentionPolicy};

use super::broadcaster::Broadcaster;

/// Builder for constructing a [`Broadcaster`] with optional settings.
pub struct BroadcasterBuilder<T> {
    cfg: BroadcasterConfig,
    initial: Option<T>,
}

impl<T> BroadcasterBuilder<T> {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: BroadcasterConfig) -> Self {
        Self { cfg, initial: None }
    }

    /// Sets the retention policy.
    pub fn policy(mut self, policy: RetentionPolicy) -> Self {
        self.cfg.policy = policy;
        self
    }

    /// Sets the label attached to log records.
    pub fn label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.cfg.label = label.into();
        self
    }

    /// Seeds the replay buffer with one value.
    ///
    /// The seed is subject to the policy like any published value, so with
    /// `RetainNewest(0)` it is discarded.
    pub fn initial(mut self, value: T) -> Self {
        self.initial = Some(value);
        self
    }
}

impl<T: Clone + Send + 'static> BroadcasterBuilder<T> {
    /// Builds and returns the broadcaster.
    pub fn build(self) -> Broadcaster<T> {
        Broadcaster::from_config(self.cfg, self.initial)
    }
}
