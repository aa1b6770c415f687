//! Bus core: registry, deferred buffer and dispatcher.
//!
//! The only public types from this module are [`EventBus`], [`BusConfig`],
//! [`Dispatch`] and the default-instance helpers.
//!
//! Internal modules:
//! - [`registry`]: key → ordered subscriptions, snapshot + one-shot claiming;
//! - [`buffer`]: key → FIFO of triggers that found no subscriber;
//! - [`dispatch`]: one isolated pass over a snapshot (shared by live triggers and replay);
//! - [`bus`]: the single-lock façade tying the three together;
//! - [`global`]: process-wide default instance.
//!
//! ```text
//!           ┌──────────────── EventBus ────────────────┐
//! trigger ─►│ Mutex<State>                             │
//!           │   ├─ Registry ── claim ──► snapshot ─────┼─► dispatch ─► handlers
//!           │   └─ Buffer   ◄─ push (no subscribers)   │
//! listen ──►│   Registry.push + Buffer.take ───────────┼─► dispatch (replay, FIFO)
//!           └──────────────────────────────────────────┘
//! ```

mod buffer;
mod bus;
mod config;
mod dispatch;
mod global;
mod registry;

pub use bus::EventBus;
pub use config::BusConfig;
pub use dispatch::Dispatch;
pub use global::{AnyArgs, DefaultBus, global};
