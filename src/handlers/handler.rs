//! # Closure-backed event handler (`Handler`)
//!
//! [`Handler`] wraps a closure `Fn(&A)` behind an `Arc`, so a handler can be
//! registered on the bus and kept by the caller for a later
//! [`EventBus::remove`](crate::EventBus::remove).
//!
//! ## Identity
//! Two handlers are the same handler if they share the same allocation:
//! a handler and its clones are identical, two handlers built from equal
//! closures are not. Removal by handler uses this identity.
//!
//! ## Example
//! ```rust
//! use eventbus::{EventBus, Handler};
//!
//! let bus: EventBus<&'static str, u32> = EventBus::new();
//! let on_ready = Handler::new(|n: &u32| println!("ready: {n}"));
//!
//! bus.listen("ready", on_ready.clone(), false);
//! assert_eq!(bus.listener_count(&"ready"), 1);
//!
//! bus.remove(&"ready", Some(&on_ready));
//! assert_eq!(bus.listener_count(&"ready"), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, HandlerError};

type HandlerFn<A> = dyn Fn(&A) -> Result<(), HandlerError> + Send + Sync + 'static;

/// Shared, cloneable event handler.
///
/// Built from an infallible closure with [`Handler::new`] or from a closure
/// returning `Result` with [`Handler::fallible`].
pub struct Handler<A> {
    f: Arc<HandlerFn<A>>,
}

impl<A> Handler<A> {
    /// Wraps an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static, // Fn, not FnMut
    {
        Self::from_fn(move |args: &A| {
            f(args);
            Ok(())
        })
    }

    /// Wraps a closure that may fail.
    ///
    /// Errors are caught by the dispatcher and logged; they never reach the publisher.
    ///
    /// ```rust
    /// use eventbus::Handler;
    ///
    /// let parse = Handler::fallible(|raw: &String| {
    ///     raw.parse::<u32>()?;
    ///     Ok::<_, std::num::ParseIntError>(())
    /// });
    /// # let _ = parse;
    /// ```
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&A) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::from_fn(move |args: &A| f(args).map_err(HandlerError::failed))
    }

    /// Wraps a closure that already reports [`HandlerError`]s.
    pub(crate) fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&A) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invokes the handler.
    #[inline]
    pub fn call(&self, args: &A) -> Result<(), HandlerError> {
        (self.f)(args)
    }

    /// Returns `true` if both handles point to the same handler.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A> PartialEq for Handler<A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A> Eq for Handler<A> {}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}
