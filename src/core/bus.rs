//! # Event bus with deferred replay.
//!
//! [`EventBus`] is an in-process publish/subscribe hub. Triggers that arrive
//! before anyone listens are buffered, and replayed when the first subscriber
//! for their key shows up.
//!
//! ## Architecture
//! ```text
//! trigger(key, args)
//!     │
//!     ├─ lock ─► Registry.claim(key)
//!     │             ├─ None ──► Buffer.push(key, args) ──► Dispatch::Buffered
//!     │             └─ Some(snapshot)
//!     ├─ unlock
//!     └─► dispatcher: h1(&args), h2(&args), ...  (errors/panics caught + logged)
//!
//! listen(key, h, once)
//!     │
//!     ├─ lock ─► Registry.push(key, h, once); pending = Buffer.take(key)
//!     ├─ unlock
//!     └─► for call in pending: claim + dispatch   (FIFO, stops on remove_all)
//! ```
//!
//! ## Rules
//! - **One lock**: registry and buffer share a single mutex, so claiming a
//!   snapshot and taking a buffer entry are each atomic.
//! - **Handlers run unlocked**: a handler may call `listen`, `remove` or
//!   `trigger` on the same bus; the running pass is unaffected.
//! - **Replay is a trigger**: buffered calls go through the same dispatch path
//!   as live ones, with the same isolation and one-shot pruning.
//! - **Replay drains**: once `listen` returns, the key's buffer entry is gone.
//!   A replayed call that finds no subscriber is dropped, not buffered again,
//!   and a `remove_all` during replay drops the calls not yet replayed.
//! - **Permissive input**: blank keys are ignored by `listen`/`remove`/`trigger`,
//!   never reported as errors.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::buffer::{BufferedCall, DeferredBuffer};
use crate::core::config::BusConfig;
use crate::core::dispatch::{self, Dispatch};
use crate::core::registry::Registry;
use crate::events::EventKey;
use crate::handlers::Handler;

/// Registry and buffer, guarded together.
struct State<K, A> {
    registry: Registry<K, A>,
    buffer: DeferredBuffer<K, A>,
    /// Bumped by `remove_all`; replay stops when it changes.
    generation: u64,
}

/// In-process event bus that buffers orphaned events.
///
/// `K` is the event key type, `A` the payload handed to handlers by reference.
/// Use a tuple for several arguments or an application enum for several event
/// types. The bus never clones payloads.
///
/// Construct one per logical scope and share it by reference or `Arc`;
/// [`global`](crate::global) is only a convenience instance.
///
/// ## Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use eventbus::{EventBus, Handler};
///
/// let bus: EventBus<&'static str, u32> = EventBus::new();
///
/// // Nobody listens yet: the call is buffered.
/// assert!(bus.trigger("ready", 1).is_buffered());
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let s = Arc::clone(&seen);
/// bus.listen("ready", Handler::new(move |n: &u32| s.lock().unwrap().push(*n)), false);
///
/// // The buffered call was replayed on subscribe; new calls go straight through.
/// bus.trigger("ready", 2);
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct EventBus<K, A> {
    state: Mutex<State<K, A>>,
    config: BusConfig,
}

impl<K: EventKey, A> EventBus<K, A> {
    /// Creates a bus with [`BusConfig::default`].
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates a bus with the given configuration.
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            state: Mutex::new(State {
                registry: Registry::new(),
                buffer: DeferredBuffer::new(config.buffer_limit()),
                generation: 0,
            }),
            config,
        }
    }

    /// Returns the configuration this bus was built with.
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Subscribes `handler` to `key`.
    ///
    /// With `once = true` the subscription is dropped after its first dispatch
    /// pass, whether or not the handler failed.
    ///
    /// If calls for `key` were buffered, they are replayed (oldest first) to
    /// every current subscriber of `key` before this method returns, and the
    /// buffer entry is left empty. A blank key is ignored.
    pub fn listen(&self, key: K, handler: Handler<A>, once: bool) {
        if key.is_blank() {
            tracing::debug!(bus = %self.config.name, event = ?key, "ignoring listen on blank key");
            return;
        }

        let (pending, generation) = {
            let mut state = self.lock();
            state.registry.push(key.clone(), handler, once);
            (state.buffer.take(&key), state.generation)
        };

        if !pending.is_empty() {
            tracing::debug!(
                bus = %self.config.name,
                event = ?key,
                count = pending.len(),
                "replaying buffered events"
            );
            self.replay(&key, pending, generation);
        }
    }

    /// Dispatches calls taken from the buffer, oldest first.
    ///
    /// Each call claims a fresh snapshot, exactly like a live trigger. A call
    /// with no subscriber left is dropped; a reset since `generation` drops
    /// the rest.
    fn replay(&self, key: &K, pending: VecDeque<BufferedCall<K, A>>, generation: u64) {
        let mut pending = pending.into_iter();
        while let Some(call) = pending.next() {
            let snapshot = {
                let mut state = self.lock();
                if state.generation != generation {
                    tracing::debug!(
                        bus = %self.config.name,
                        event = ?key,
                        dropped = pending.len() + 1,
                        "bus reset during replay, dropping remaining events"
                    );
                    return;
                }
                state.registry.claim(&call.key)
            };

            match snapshot {
                Some(snapshot) => {
                    dispatch::dispatch(&self.config.name, &call.key, &snapshot, &call.args);
                }
                None => tracing::debug!(
                    bus = %self.config.name,
                    event = ?key,
                    "no subscribers left, dropping replayed event"
                ),
            }
        }
    }

    /// Subscribes `handler` to `key` for a single dispatch pass.
    ///
    /// Shorthand for `listen(key, handler, true)`.
    pub fn once(&self, key: K, handler: Handler<A>) {
        self.listen(key, handler, true);
    }

    /// Subscribes `handler` to `key`, receiving buffered history too.
    ///
    /// Identical to [`listen`](Self::listen), which always replays buffered
    /// calls; the name spells out the intent at call sites that depend on it.
    pub fn listen_all_task(&self, key: K, handler: Handler<A>, once: bool) {
        self.listen(key, handler, once);
    }

    /// Publishes `args` under `key`.
    ///
    /// - Blank key: nothing happens, [`Dispatch::Ignored`] returned.
    /// - No subscriber: the call is buffered and [`Dispatch::Buffered`] returned.
    /// - Otherwise every subscriber in the current snapshot is invoked in
    ///   subscription order. Handler errors and panics are logged, never returned.
    ///
    /// The returned [`Dispatch`] is informational and may be ignored.
    pub fn trigger(&self, key: K, args: A) -> Dispatch {
        if key.is_blank() {
            tracing::debug!(bus = %self.config.name, event = ?key, "ignoring trigger on blank key");
            return Dispatch::Ignored;
        }

        let snapshot = {
            let mut state = self.lock();
            match state.registry.claim(&key) {
                Some(snapshot) => snapshot,
                None => {
                    tracing::debug!(
                        bus = %self.config.name,
                        event = ?key,
                        "no subscribers, buffering"
                    );
                    if let Some(evicted) = state.buffer.push(key, args) {
                        tracing::warn!(
                            bus = %self.config.name,
                            event = ?evicted.key,
                            limit = self.config.buffer_capacity,
                            "deferred buffer full, dropped oldest event"
                        );
                    }
                    return Dispatch::Buffered;
                }
            }
        };

        dispatch::dispatch(&self.config.name, &key, &snapshot, &args)
    }

    /// Removes subscriptions for `key`.
    ///
    /// - `None` drops every subscriber of `key`.
    /// - `Some(h)` drops only subscriptions of that handler (see [`Handler::ptr_eq`]).
    ///
    /// Buffered calls are not touched. Unknown or blank keys are a no-op.
    pub fn remove(&self, key: &K, handler: Option<&Handler<A>>) {
        if key.is_blank() {
            return;
        }
        let removed = self.lock().registry.remove(key, handler);
        if removed > 0 {
            tracing::trace!(
                bus = %self.config.name,
                event = ?key,
                removed,
                "removed subscriptions"
            );
        }
    }

    /// Drops every subscription and every buffered call.
    pub fn remove_all(&self) {
        let mut state = self.lock();
        state.registry.clear();
        state.buffer.clear();
        state.generation = state.generation.wrapping_add(1);
        drop(state);
        tracing::debug!(bus = %self.config.name, "bus reset");
    }

    /// Number of subscriptions currently registered for `key`.
    pub fn listener_count(&self, key: &K) -> usize {
        self.lock().registry.count(key)
    }

    /// Keys that currently have at least one subscription (unordered).
    ///
    /// Keys that only have buffered calls are not included; see
    /// [`buffered_names`](Self::buffered_names).
    pub fn event_names(&self) -> Vec<K> {
        self.lock().registry.keys()
    }

    /// Number of calls buffered for `key`.
    pub fn buffered_count(&self, key: &K) -> usize {
        self.lock().buffer.count(key)
    }

    /// Keys that currently have buffered calls (unordered).
    pub fn buffered_names(&self) -> Vec<K> {
        self.lock().buffer.keys()
    }

    /// Returns `true` when the bus has neither subscriptions nor buffered calls.
    pub fn is_idle(&self) -> bool {
        let state = self.lock();
        state.registry.is_empty() && state.buffer.is_empty()
    }

    /// Handlers never run under this lock, so a poisoned mutex still guards
    /// consistent state.
    fn lock(&self) -> MutexGuard<'_, State<K, A>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: EventKey, A> Default for EventBus<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A> std::fmt::Debug for EventBus<K, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("name", &self.config.name)
            .finish_non_exhaustive()
    }
}
