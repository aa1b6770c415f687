//! Event keys: the identifiers events are grouped under.
//!
//! ## Contents
//! - [`EventKey`] bound on every key type accepted by the bus
//! - [`EventName`] closed key type (string name or symbol)
//! - [`Symbol`] unique token key
//!
//! Keys are used by both the registry and the deferred buffer; see
//! `core/mod.rs` for how the two maps relate.

mod key;

pub use key::{EventKey, EventName, Symbol};
