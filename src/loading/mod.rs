//! # Reference-counted loading indicator.
//!
//! A typical producer of orphaned events: request wrappers open and close the
//! indicator long before (or after) the overlay component that displays it exists.
//!
//! - [`LoadingTracker`] - counter + style, broadcasting [`LoadingState`] on the bus
//! - [`LoadingOptions`] - partial style update
//! - [`LOADING_EVENT`] - default event key

mod state;
mod tracker;

pub use state::{LOADING_EVENT, LoadingOptions, LoadingState, LoadingStyle};
pub use tracker::LoadingTracker;
