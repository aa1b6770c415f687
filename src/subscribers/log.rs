//! # LogWriter: simple payload logger
//!
//! A minimal subscriber that logs every payload it receives through `tracing`.
//! Use it for tests, demos, or to watch one event key while debugging.
//!
//! ## Example output
//! ```text
//! INFO eventbus::subscribers::log: event received subscriber="LogWriter" label="loading" args=LoadingState { visible: true, .. }
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use crate::subscribers::Subscribe;

/// Payload writer subscriber.
#[derive(Debug)]
pub struct LogWriter {
    label: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] tagging its records with `label`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }

    /// Label attached to every record.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("events")
    }
}

#[async_trait]
impl<A> Subscribe<A> for LogWriter
where
    A: Debug + Send + Sync + 'static,
{
    async fn on_event(&self, args: &A) {
        tracing::info!(
            subscriber = "LogWriter",
            label = self.label,
            args = ?args,
            "event received"
        );
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventBus;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_log_writer_consumes_events() {
        let bus: EventBus<&'static str, (u32, &'static str)> = EventBus::new();
        bus.trigger("pair", (1, "one"));

        let handle = bus.spawn_subscriber("pair", Arc::new(LogWriter::new("pairs")));
        bus.trigger("pair", (2, "two"));
        assert_eq!(handle.name(), "LogWriter");
        handle.shutdown(&bus).await;

        assert!(bus.is_idle());
        assert_eq!(LogWriter::default().label(), "events");
    }
}
