//! # Worker-backed async subscribers.
//!
//! [`EventBus::spawn_subscriber`] bridges the synchronous dispatch pass to an
//! async [`Subscribe`] implementation without making the bus wait for it.
//!
//! ## Architecture
//! ```text
//! spawn_subscriber(key, sub)
//!     │
//!     ├──► bus.listen(key, forwarding handler)
//!     │         └─ try_send(args.clone()) ──► [bounded queue]
//!     │                                          │
//!     └──► tokio::spawn(worker) ◄────────────────┘
//!               └─► sub.on_event(&args)  (panic → caught, logged)
//! ```
//!
//! ## Rules
//! - **Non-blocking**: the forwarding handler uses `try_send` and returns immediately.
//! - **Overflow**: a full or closed queue drops the event for this subscriber only and
//!   reports [`HandlerError::Overflow`], which the dispatcher logs.
//! - **Per-subscriber FIFO**: events are processed in the order they were dispatched.
//! - **Replay**: calls buffered before the subscriber existed are forwarded like live ones.
//! - **Shutdown**: closes the queue from the worker side, so it completes even while
//!   clones of the forwarding handler are still alive.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber panics while holding a lock on its own state.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::core::EventBus;
use crate::error::{HandlerError, panic_message};
use crate::events::EventKey;
use crate::handlers::Handler;
use crate::subscribers::Subscribe;

/// Handle to a running subscriber worker.
///
/// Dropping the handle does not stop the worker; use [`shutdown`](Self::shutdown)
/// or [`cancel`](Self::cancel).
pub struct SubscriberHandle<K, A> {
    key: K,
    name: &'static str,
    handler: Handler<A>,
    cancel: CancellationToken,
    closing: CancellationToken,
    join: JoinHandle<()>,
}

impl<K: EventKey, A> SubscriberHandle<K, A> {
    /// Event key the subscriber listens on.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Subscriber name as reported by [`Subscribe::name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Forwarding handler registered on the bus.
    pub fn handler(&self) -> &Handler<A> {
        &self.handler
    }

    /// Returns `true` once the worker task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stops the worker without draining its queue.
    ///
    /// The forwarding handler stays registered; later events for this
    /// subscriber are reported as overflow (`"closed"`). Call
    /// [`EventBus::remove`] with [`handler`](Self::handler) to unregister it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the worker task to exit.
    pub async fn join(self) {
        let _ = self.join.await;
    }

    /// Gracefully shuts the subscriber down.
    ///
    /// 1. Removes the forwarding handler from `bus` (no new events are queued)
    /// 2. Closes the queue; clones of [`handler`](Self::handler) now report `"closed"`
    /// 3. Awaits the worker after it processed every event already queued
    pub async fn shutdown(self, bus: &EventBus<K, A>) {
        bus.remove(&self.key, Some(&self.handler));
        self.closing.cancel();
        let _ = self.join.await;
    }
}

impl<K: EventKey, A> EventBus<K, A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Subscribes an async [`Subscribe`] implementation to `key`.
    ///
    /// Registers a forwarding handler and spawns one worker task that calls
    /// [`Subscribe::on_event`] for each queued payload. Calls buffered for `key`
    /// are replayed into the queue immediately.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_subscriber(&self, key: K, sub: Arc<dyn Subscribe<A>>) -> SubscriberHandle<K, A> {
        let cap = sub.queue_capacity().max(1);
        let name = sub.name();
        let (tx, mut rx) = mpsc::channel::<A>(cap);
        let cancel = CancellationToken::new();
        let closing = CancellationToken::new();

        let token = cancel.clone();
        let close = closing.clone();
        let bus_name = self.config().name.clone();
        let join = tokio::spawn(async move {
            let mut closed = false;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = close.cancelled(), if !closed => {
                        // recv drains what is queued, then yields None
                        rx.close();
                        closed = true;
                    }
                    msg = rx.recv() => match msg {
                        Some(args) => {
                            let fut = std::panic::AssertUnwindSafe(sub.on_event(&args));
                            if let Err(panic_err) = fut.catch_unwind().await {
                                tracing::error!(
                                    bus = %bus_name,
                                    subscriber = name,
                                    info = %panic_message(&*panic_err),
                                    "subscriber panicked"
                                );
                            }
                        }
                        None => break,
                    }
                }
            }
            tracing::debug!(bus = %bus_name, subscriber = name, "subscriber worker stopped");
        });

        let handler = Handler::from_fn(move |args: &A| match tx.try_send(args.clone()) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(HandlerError::Overflow {
                subscriber: name,
                reason: "full",
            }),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(HandlerError::Overflow {
                subscriber: name,
                reason: "closed",
            }),
        });

        self.listen(key.clone(), handler.clone(), false);

        SubscriberHandle {
            key,
            name,
            handler,
            cancel,
            closing,
            join,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dispatch;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Recorder {
        seen: Mutex<Vec<u32>>,
        cap: usize,
    }

    #[async_trait]
    impl Subscribe<u32> for Recorder {
        async fn on_event(&self, n: &u32) {
            if *n == 13 {
                panic!("unlucky");
            }
            tokio::task::yield_now().await;
            self.seen.lock().unwrap().push(*n);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }

        fn queue_capacity(&self) -> usize {
            if self.cap == 0 { 1024 } else { self.cap }
        }
    }

    fn recorder(cap: usize) -> Arc<Recorder> {
        Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
            cap,
        })
    }

    #[tokio::test]
    async fn test_delivers_buffered_and_live_events_in_order() {
        let bus: EventBus<&'static str, u32> = EventBus::new();
        let rec = recorder(0);

        bus.trigger("n", 1);
        bus.trigger("n", 2);
        let handle = bus.spawn_subscriber("n", rec.clone());
        bus.trigger("n", 3);

        assert_eq!(handle.name(), "recorder");
        assert_eq!(*handle.key(), "n");
        handle.shutdown(&bus).await;

        assert_eq!(*rec.seen.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(bus.listener_count(&"n"), 0);
    }

    #[tokio::test]
    async fn test_panic_is_isolated() {
        let bus: EventBus<&'static str, u32> = EventBus::new();
        let rec = recorder(0);

        let handle = bus.spawn_subscriber("n", rec.clone());
        for n in [1, 13, 2] {
            bus.trigger("n", n);
        }
        handle.shutdown(&bus).await;

        assert_eq!(*rec.seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_full_queue_drops_for_this_subscriber() {
        let bus: EventBus<&'static str, u32> = EventBus::new();
        let rec = recorder(1);

        let handle = bus.spawn_subscriber("n", rec.clone());
        // current-thread runtime: the worker cannot drain until we await
        assert_eq!(
            bus.trigger("n", 1),
            Dispatch::Delivered {
                invoked: 1,
                failed: 0
            }
        );
        assert_eq!(
            bus.trigger("n", 2),
            Dispatch::Delivered {
                invoked: 1,
                failed: 1
            }
        );
        handle.shutdown(&bus).await;

        assert_eq!(*rec.seen.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_shutdown_completes_while_handler_clone_is_alive() {
        let bus: EventBus<&'static str, u32> = EventBus::new();
        let rec = recorder(0);

        let handle = bus.spawn_subscriber("n", rec.clone());
        let forward = handle.handler().clone();
        bus.trigger("n", 1);
        bus.trigger("n", 2);

        let done = tokio::time::timeout(Duration::from_secs(2), handle.shutdown(&bus)).await;
        assert!(done.is_ok());
        assert_eq!(*rec.seen.lock().unwrap(), vec![1, 2]);
        assert_eq!(bus.listener_count(&"n"), 0);

        let err = forward.call(&3).unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Overflow {
                subscriber: "recorder",
                reason: "closed"
            }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_worker_reports_closed() {
        let bus: EventBus<&'static str, u32> = EventBus::new();
        let rec = recorder(0);

        let handle = bus.spawn_subscriber("n", rec.clone());
        let forward = handle.handler().clone();
        handle.cancel();
        handle.join().await;

        let err = forward.call(&1).unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Overflow {
                subscriber: "recorder",
                reason: "closed"
            }
        ));
        assert_eq!(
            bus.trigger("n", 1),
            Dispatch::Delivered {
                invoked: 1,
                failed: 1
            }
        );
        assert!(rec.seen.lock().unwrap().is_empty());
    }
}
