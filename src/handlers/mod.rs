//! # Event handlers.
//!
//! - [`Handler`] - shared closure invoked synchronously during a dispatch pass

mod handler;

pub use handler::Handler;
