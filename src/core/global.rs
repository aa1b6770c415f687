//! # Process-wide default bus.
//!
//! A convenience for code that has no natural owner to inject a bus from.
//! Payloads are type-erased ([`AnyArgs`]); handlers downcast what they expect.
//! Prefer constructing a typed [`EventBus`] and passing it explicitly.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use crate::core::bus::EventBus;
use crate::core::config::BusConfig;
use crate::events::EventName;

/// Type-erased payload carried by the default bus.
pub type AnyArgs = Arc<dyn Any + Send + Sync>;

/// Bus type of the process-wide default instance.
pub type DefaultBus = EventBus<EventName, AnyArgs>;

static GLOBAL: OnceLock<DefaultBus> = OnceLock::new();

/// Returns the process-wide default bus, creating it on first use.
///
/// ```rust
/// use std::sync::Arc;
/// use eventbus::{global, AnyArgs, EventName, Handler};
///
/// global().trigger(EventName::from("doc-ready"), Arc::new(42_u32));
/// global().once(
///     EventName::from("doc-ready"),
///     Handler::new(|args: &AnyArgs| assert_eq!(args.downcast_ref::<u32>(), Some(&42))),
/// );
/// ```
pub fn global() -> &'static DefaultBus {
    GLOBAL.get_or_init(|| EventBus::with_config(BusConfig::named("global")))
}
