//! # LogWriter: simple value logger
//!
//! A minimal subscriber that records every published value through `tracing`
//! at `INFO` level. Use it for tests or demos.
//!
//! ## Example output (with a fmt subscriber installed)
//! ```text
//! INFO replaycast::subscribers::log: value subscriber="log-writer" value=Online
//! INFO replaycast::subscribers::log: value subscriber="log-writer" value=Offline
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use crate::subscribers::Subscribe;

/// Value logging subscriber.
pub struct LogWriter {
    name: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] named `"log-writer"`.
    #[must_use]
    pub fn new() -> Self {
        Self::named("log-writer")
    }

    /// Construct a [`LogWriter`] with a custom name (shown in the `subscriber` field).
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Subscribe<T> for LogWriter
where
    T: Debug + Send + Sync + 'static,
{
    async fn on_event(&self, value: &T) {
        tracing::info!(subscriber = self.name, value = ?value, "value");
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
