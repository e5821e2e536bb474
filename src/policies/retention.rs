//! # Retention policies for the replay buffer.
//!
//! [`RetentionPolicy`] decides which published values a broadcaster keeps so that
//! late subscribers can be brought up to date.
//!
//! - [`RetentionPolicy::RetainNewest`] keeps a sliding window of the last `n` values.
//! - [`RetentionPolicy::RetainOldest`] keeps the first `n` values and then stops growing.
//! - [`RetentionPolicy::RetainAll`] keeps everything.
//!
//! ## Choosing the right policy
//!
//! **State-like values** (connectivity, current price, session):
//! ```text
//! RetainNewest(1)  → new subscribers immediately see the last known state
//! ```
//!
//! **Pure event streams** (clicks, notifications):
//! ```text
//! RetainNewest(0)  → no replay, only values published after subscribing
//! ```
//!
//! **Handshake / preamble streams** (first messages matter most):
//! ```text
//! RetainOldest(n)  → replay the first n values, later values are live-only
//! ```
//!
//! Policies can also be read from text, e.g. from an environment variable:
//! ```rust
//! use replaycast::RetentionPolicy;
//!
//! assert_eq!("newest:1".parse::<RetentionPolicy>(), Ok(RetentionPolicy::RetainNewest(1)));
//! assert_eq!("Oldest:4".parse::<RetentionPolicy>(), Ok(RetentionPolicy::RetainOldest(4)));
//! assert_eq!("all".parse::<RetentionPolicy>(), Ok(RetentionPolicy::RetainAll));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParsePolicyError;

/// Policy controlling how many published values are kept for replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    /// Keep only the last `n` values (oldest are dropped first).
    RetainNewest(usize),
    /// Keep the first `n` values ever retained; once full, later values are
    /// delivered live but never added to the buffer.
    RetainOldest(usize),
    /// Never trim.
    RetainAll,
}

impl RetentionPolicy {
    /// No replay at all: subscribers only see values published after they subscribe.
    pub const fn events() -> Self {
        RetentionPolicy::RetainNewest(0)
    }

    /// Replay the most recent value only.
    pub const fn latest() -> Self {
        RetentionPolicy::RetainNewest(1)
    }

    /// Returns the buffer bound, or `None` for [`RetentionPolicy::RetainAll`].
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        match *self {
            RetentionPolicy::RetainNewest(n) | RetentionPolicy::RetainOldest(n) => Some(n),
            RetentionPolicy::RetainAll => None,
        }
    }

    /// True if the buffer can never hold a value.
    #[inline]
    pub fn retains_nothing(&self) -> bool {
        self.capacity() == Some(0)
    }
}

impl Default for RetentionPolicy {
    /// Returns [`RetentionPolicy::RetainNewest(0)`](RetentionPolicy::RetainNewest).
    fn default() -> Self {
        RetentionPolicy::events()
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::RetainNewest(n) => write!(f, "newest:{n}"),
            RetentionPolicy::RetainOldest(n) => write!(f, "oldest:{n}"),
            RetentionPolicy::RetainAll => f.write_str("all"),
        }
    }
}

impl FromStr for RetentionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, capacity) = match s.split_once(':') {
            Some((kind, cap)) => (kind.trim(), Some(cap.trim())),
            None => (s, None),
        };

        let bounded = |make: fn(usize) -> RetentionPolicy| match capacity {
            None | Some("") => Err(ParsePolicyError::MissingCapacity {
                kind: kind.to_string(),
            }),
            Some(cap) => cap
                .parse::<usize>()
                .map(make)
                .map_err(|source| ParsePolicyError::InvalidCapacity {
                    input: cap.to_string(),
                    source,
                }),
        };

        match kind.to_ascii_lowercase().as_str() {
            "newest" => bounded(RetentionPolicy::RetainNewest),
            "oldest" => bounded(RetentionPolicy::RetainOldest),
            "all" => match capacity {
                None => Ok(RetentionPolicy::RetainAll),
                Some(cap) => Err(ParsePolicyError::UnexpectedCapacity {
                    input: cap.to_string(),
                }),
            },
            _ => Err(ParsePolicyError::UnknownKind {
                kind: kind.to_string(),
            }),
        }
    }
}
