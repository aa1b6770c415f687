//! # eventbus
//!
//! **eventbus** is an in-process publish/subscribe hub for applications whose
//! producers and consumers come and go independently (UI components, request
//! wrappers, background services).
//!
//! Its distinguishing rule: an event triggered while nobody listens is not lost.
//! It is buffered under its key and replayed, in order, to the first subscriber
//! that shows up for that key.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Producer A        Producer B                       Consumer (mounted later)
//!       │                 │                                     │
//!  trigger(k, a)     trigger(k, b)                         listen(k, h)
//!       │                 │                                     │
//!       ▼                 ▼                                     ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  EventBus (one mutex)                                                 │
//! │  - Registry        key → [Subscription { handler, once }]             │
//! │  - Deferred buffer key → [BufferedCall { key, args }]  (FIFO)         │
//! └──────┬──────────────────────────────────────┬─────────────────────────┘
//!        │ subscribers present                  │ first listen on a buffered key
//!        ▼                                      ▼
//! ┌──────────────────────────────┐    ┌──────────────────────────────────┐
//! │ Dispatcher                   │◄───│ replay: dispatch(k, args) per    │
//! │ - snapshot of subscribers    │    │ buffered call, oldest first      │
//! │ - errors/panics caught+logged│    └──────────────────────────────────┘
//! │ - one-shots pruned           │
//! └──────────────────────────────┘
//! ```
//!
//! ### Trigger lifecycle
//! ```text
//! trigger(key, args)
//!   ├─ lock
//!   ├─ Registry.claim(key)
//!   │     ├─ none ─► Buffer.push(key, args) ─► unlock ─► Dispatch::Buffered
//!   │     └─ snapshot (one-shots removed from registry now)
//!   ├─ unlock
//!   └─ for sub in snapshot:
//!          handler(&args)
//!            ├─ Ok           ─► next
//!            ├─ Err(e)       ─► log error, next
//!            └─ panic        ─► catch, log error, next
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------|------------------------------------------|
//! | **Bus**           | Listen, trigger, remove; buffer-and-replay of orphaned events | [`EventBus`], [`Dispatch`]               |
//! | **Keys**          | Typed event keys: strings, symbols, application enums        | [`EventKey`], [`EventName`], [`Symbol`]  |
//! | **Handlers**      | Sync closures, fallible or not, removable by identity        | [`Handler`]                              |
//! | **Async**         | Worker-backed subscribers with bounded queues                | [`Subscribe`], [`SubscriberHandle`]      |
//! | **Errors**        | Typed handler failures, logged never propagated              | [`HandlerError`]                         |
//! | **Configuration** | Per-bus label and buffer bound                               | [`BusConfig`]                            |
//! | **Loading**       | Reference-counted loading indicator on top of the bus        | [`LoadingTracker`], [`LoadingState`]     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber _(demo/reference only)_.
//!
//! ## Logging
//! The crate logs through [`tracing`] and never installs a subscriber itself.
//! Handler failures are `error`, buffer evictions and queue overflows `warn`,
//! buffering and replay `debug`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use eventbus::{EventBus, EventKey, Handler};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Topic { Ready }
//! impl EventKey for Topic {}
//!
//! let bus: EventBus<Topic, u32> = EventBus::new();
//! bus.trigger(Topic::Ready, 1);                         // buffered
//!
//! let total = Arc::new(AtomicU32::new(0));
//! let t = Arc::clone(&total);
//! bus.listen(Topic::Ready, Handler::new(move |n: &u32| {
//!     t.fetch_add(*n, Ordering::SeqCst);
//! }), false);                                           // replays 1
//!
//! bus.trigger(Topic::Ready, 2);                         // delivered directly
//! assert_eq!(total.load(Ordering::SeqCst), 3);
//! assert_eq!(bus.listener_count(&Topic::Ready), 1);
//! ```
mod core;
mod error;
mod events;
mod handlers;
mod loading;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{AnyArgs, BusConfig, DefaultBus, Dispatch, EventBus, global};
pub use error::{BoxError, HandlerError};
pub use events::{EventKey, EventName, Symbol};
pub use handlers::Handler;
pub use loading::{LOADING_EVENT, LoadingOptions, LoadingState, LoadingStyle, LoadingTracker};
pub use subscribers::{Subscribe, SubscriberHandle};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
