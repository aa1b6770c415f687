//! # Async subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for consumers whose reaction to
//! an event is asynchronous (I/O, timers, other async services).
//!
//! Each subscriber spawned with [`EventBus::spawn_subscriber`](crate::EventBus::spawn_subscriber) gets:
//! - **Dedicated worker task** (runs independently of the publisher)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged; the worker keeps going)
//!
//! ## Architecture
//! ```text
//! trigger ──► dispatch pass ──► forwarding handler ──try_send──► [bounded queue] ──► worker ──► on_event()
//!                                      └─► queue full/closed → HandlerError::Overflow (logged)
//! ```
//!
//! ## Rules
//! - The bus never awaits `on_event`; a slow subscriber only fills its own queue.
//! - Queue overflow drops the event **for this subscriber only**.
//! - Events are processed sequentially (FIFO) per subscriber.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use eventbus::Subscribe;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe<String> for Audit {
//!     async fn on_event(&self, line: &String) {
//!         // write audit record...
//!         let _ = line;
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }    // prefer short, descriptive names
//!     fn queue_capacity(&self) -> usize { 256 }
//! }
//! ```

use async_trait::async_trait;

/// Asynchronous event consumer.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe<A>: Send + Sync + 'static
where
    A: Send + Sync + 'static,
{
    /// Processes a single payload.
    ///
    /// Called from the subscriber's worker task, not in the publisher context.
    async fn on_event(&self, args: &A);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// The runtime clamps capacity to a minimum of 1.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
