//! # Dispatcher: one synchronous pass over a subscriber snapshot.
//!
//! Shared by live triggers and buffer replay.
//!
//! ## Rules
//! - Handlers run in snapshot order, outside the bus lock.
//! - A handler error or panic is caught, logged with the event key, and the
//!   pass continues with the next handler.
//! - Nothing a handler does can make the pass fail.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a handler panics while holding a lock on its own state.

use std::panic::{self, AssertUnwindSafe};

use crate::core::registry::Subscription;
use crate::error::HandlerError;
use crate::events::EventKey;

/// Outcome of a single `trigger` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The key was blank; the call was dropped.
    Ignored,
    /// No subscriber was registered; the call was stored for later replay.
    Buffered,
    /// The call was delivered to a snapshot of subscribers.
    Delivered {
        /// Handlers invoked in this pass.
        invoked: usize,
        /// Handlers that returned an error or panicked.
        failed: usize,
    },
}

impl Dispatch {
    /// Returns `true` if the call was buffered instead of delivered.
    pub fn is_buffered(&self) -> bool {
        matches!(self, Dispatch::Buffered)
    }
}

/// Runs one dispatch pass for `key`.
pub(crate) fn dispatch<K: EventKey, A>(
    bus: &str,
    key: &K,
    snapshot: &[Subscription<A>],
    args: &A,
) -> Dispatch {
    let mut failed = 0;

    for sub in snapshot {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sub.handler.call(args)))
            .unwrap_or_else(|payload| Err(HandlerError::panicked(payload.as_ref())));

        if let Err(err) = outcome {
            failed += 1;
            tracing::error!(
                bus = %bus,
                event = ?key,
                once = sub.once,
                label = err.as_label(),
                error = %err.as_message(),
                "event handler failed"
            );
        }
    }

    tracing::trace!(bus = %bus, event = ?key, invoked = snapshot.len(), failed, "dispatched");
    Dispatch::Delivered {
        invoked: snapshot.len(),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Handler;
    use std::sync::{Arc, Mutex};

    fn sub(handler: Handler<u32>) -> Subscription<u32> {
        Subscription {
            handler,
            once: false,
        }
    }

    #[test]
    fn test_failures_do_not_skip_siblings() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s1 = Arc::clone(&seen);
        let s2 = Arc::clone(&seen);

        let snapshot = vec![
            sub(Handler::fallible(|_| Err("nope"))),
            sub(Handler::new(move |n| s1.lock().unwrap().push(("b", *n)))),
            sub(Handler::new(|_| panic!("boom"))),
            sub(Handler::new(move |n| s2.lock().unwrap().push(("d", *n)))),
        ];

        let out = dispatch("test", &"y", &snapshot, &7);

        assert_eq!(
            out,
            Dispatch::Delivered {
                invoked: 4,
                failed: 2
            }
        );
        assert_eq!(*seen.lock().unwrap(), vec![("b", 7), ("d", 7)]);
    }

    #[test]
    fn test_empty_snapshot_delivers_nothing() {
        let out = dispatch::<&'static str, u32>("test", &"y", &[], &1);
        assert_eq!(
            out,
            Dispatch::Delivered {
                invoked: 0,
                failed: 0
            }
        );
        assert!(!out.is_buffered());
    }
}
