//! # Async subscribers.
//!
//! Synchronous [`Handler`](crate::Handler)s run inside the dispatch pass. Consumers
//! that need to await something implement [`Subscribe`] instead and are driven by a
//! dedicated worker task fed from a bounded queue.
//!
//! ## Architecture
//! ```text
//! trigger(key, args) ──► dispatch pass
//!                            │
//!                            ├──► Handler (sync, in pass)
//!                            │
//!                            └──► forwarding Handler ──► [queue] ──► worker ──► Subscribe::on_event
//!                                                                       ┌────┴────┬─────────┐
//!                                                                       ▼         ▼         ▼
//!                                                                   LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use eventbus::{EventBus, Subscribe};
//!
//! struct Notifier;
//!
//! #[async_trait]
//! impl Subscribe<String> for Notifier {
//!     async fn on_event(&self, message: &String) {
//!         // push to a remote service...
//!         let _ = message;
//!     }
//!     fn name(&self) -> &'static str { "notifier" }
//! }
//!
//! # async fn demo() {
//! let bus: EventBus<&'static str, String> = EventBus::new();
//! let handle = bus.spawn_subscriber("notice", Arc::new(Notifier));
//! bus.trigger("notice", "saved".to_string());
//! handle.shutdown(&bus).await;
//! # }
//! ```

mod subscriber;
mod worker;

#[cfg(feature = "logging")]
mod log;

pub use subscriber::Subscribe;
pub use worker::SubscriberHandle;

#[cfg(feature = "logging")]
pub use log::LogWriter;
