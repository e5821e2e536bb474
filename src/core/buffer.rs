//! # Replay buffer.
//!
//! Ordered storage of retained values, trimmed according to a [`RetentionPolicy`].
//!
//! ## Rules
//! - `len() <= n` for `RetainNewest(n)` / `RetainOldest(n)`; unbounded for `RetainAll`.
//! - Iteration order is publish order (oldest retained first).
//! - The value is cloned into the buffer only if the policy actually keeps it.

use std::collections::VecDeque;

use crate::policies::RetentionPolicy;

/// Values kept for replay to new subscribers.
#[derive(Debug)]
pub(crate) struct ReplayBuffer<T> {
    policy: RetentionPolicy,
    items: VecDeque<T>,
}

impl<T> ReplayBuffer<T> {
    pub(crate) fn new(policy: RetentionPolicy) -> Self {
        let items = match policy.capacity() {
            Some(n) => VecDeque::with_capacity(n.min(64)),
            None => VecDeque::new(),
        };
        Self { policy, items }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

}

impl<T: Clone> ReplayBuffer<T> {
    /// Appends `value` and applies the policy.
    ///
    /// Returns `true` if the value is now retained.
    pub(crate) fn retain(&mut self, value: &T) -> bool {
        match self.policy {
            RetentionPolicy::RetainAll => {
                self.items.push_back(value.clone());
                true
            }
            RetentionPolicy::RetainNewest(0) | RetentionPolicy::RetainOldest(0) => false,
            RetentionPolicy::RetainNewest(n) => {
                while self.items.len() >= n {
                    self.items.pop_front();
                }
                self.items.push_back(value.clone());
                true
            }
            RetentionPolicy::RetainOldest(n) => {
                if self.items.len() >= n {
                    return false;
                }
                self.items.push_back(value.clone());
                true
            }
        }
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
