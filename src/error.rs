//! Error types used by the broadcaster's helper APIs.
//!
//! The broadcaster itself never fails: `publish`, `subscribe`, `last_value` and
//! `has_subscribers` return plain values. Errors only appear on the edges:
//!
//! - [`ParsePolicyError`]: a retention policy could not be parsed from text.
//! - [`TryRecvError`]: a non-blocking receive found nothing to return.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::num::ParseIntError;
use thiserror::Error;

/// # Errors produced while parsing a [`RetentionPolicy`](crate::RetentionPolicy).
///
/// Accepted forms are `all`, `newest:<n>` and `oldest:<n>` (case-insensitive).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePolicyError {
    /// The policy kind is not one of `all`, `newest`, `oldest`.
    #[error("unknown retention policy {kind:?}; expected all, newest:<n> or oldest:<n>")]
    UnknownKind {
        /// The kind as written by the caller.
        kind: String,
    },

    /// A bounded policy was given without its capacity.
    #[error("retention policy {kind:?} requires a capacity (e.g. {kind}:1)")]
    MissingCapacity {
        /// The kind as written by the caller.
        kind: String,
    },

    /// The capacity is not a valid unsigned integer.
    #[error("invalid retention capacity {input:?}: {source}")]
    InvalidCapacity {
        /// The capacity text as written by the caller.
        input: String,
        /// Underlying integer parse error.
        #[source]
        source: ParseIntError,
    },

    /// `all` does not take a capacity.
    #[error("retention policy \"all\" does not take a capacity (got {input:?})")]
    UnexpectedCapacity {
        /// The trailing capacity text.
        input: String,
    },
}

impl ParsePolicyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use replaycast::RetentionPolicy;
    ///
    /// let err = "sometimes:3".parse::<RetentionPolicy>().unwrap_err();
    /// assert_eq!(err.as_label(), "policy_unknown_kind");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ParsePolicyError::UnknownKind { .. } => "policy_unknown_kind",
            ParsePolicyError::MissingCapacity { .. } => "policy_missing_capacity",
            ParsePolicyError::InvalidCapacity { .. } => "policy_invalid_capacity",
            ParsePolicyError::UnexpectedCapacity { .. } => "policy_unexpected_capacity",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ParsePolicyError::UnknownKind { kind } => format!("unknown kind: {kind}"),
            ParsePolicyError::MissingCapacity { kind } => format!("missing capacity for {kind}"),
            ParsePolicyError::InvalidCapacity { input, source } => {
                format!("invalid capacity {input}: {source}")
            }
            ParsePolicyError::UnexpectedCapacity { input } => {
                format!("unexpected capacity: {input}")
            }
        }
    }
}

/// # Errors produced by [`Subscription::try_recv`](crate::Subscription::try_recv).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing is queued right now; the subscription is still live.
    #[error("no value queued")]
    Empty,

    /// The broadcaster was torn down and every queued value has been consumed.
    #[error("broadcaster closed")]
    Closed,
}

impl TryRecvError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TryRecvError::Empty => "recv_empty",
            TryRecvError::Closed => "recv_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }

    /// Indicates whether a later receive may still yield a value.
    ///
    /// # Example
    /// ```
    /// use replaycast::TryRecvError;
    ///
    /// assert!(TryRecvError::Empty.is_transient());
    /// assert!(!TryRecvError::Closed.is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        matches!(self, TryRecvError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let err = ParsePolicyError::MissingCapacity {
            kind: "newest".into(),
        };
        assert_eq!(err.as_label(), "policy_missing_capacity");
        assert_eq!(TryRecvError::Closed.as_label(), "recv_closed");
    }

    #[test]
    fn test_invalid_capacity_keeps_source() {
        let source = "x".parse::<usize>().unwrap_err();
        let err = ParsePolicyError::InvalidCapacity {
            input: "x".into(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.as_message().starts_with("invalid capacity x"));
    }
}
