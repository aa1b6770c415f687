//! # Subscription registry.
//!
//! Maps each event key to the ordered list of its active subscriptions.
//!
//! ## Architecture
//! ```text
//! listen(key, h, once) ──► Registry.push(key, h, once)
//! trigger(key, args)   ──► Registry.claim(key) ──► snapshot ──► dispatcher
//!                                │
//!                                └─► one-shot subscriptions removed now
//! remove(key, h?)      ──► Registry.remove(key, h?)
//! remove_all()         ──► Registry.clear()
//! ```
//!
//! ## Rules
//! - Insertion order is invocation order.
//! - An entry exists only while its list is non-empty.
//! - The registry never touches the deferred buffer.
//! - The registry is not synchronized; the bus holds it behind its state lock.

use std::collections::HashMap;

use crate::events::EventKey;
use crate::handlers::Handler;

/// A registered handler plus its one-shot flag.
pub(crate) struct Subscription<A> {
    pub(crate) handler: Handler<A>,
    pub(crate) once: bool,
}

impl<A> Clone for Subscription<A> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            once: self.once,
        }
    }
}

/// Event key → ordered subscriptions.
pub(crate) struct Registry<K, A> {
    entries: HashMap<K, Vec<Subscription<A>>>,
}

impl<K: EventKey, A> Registry<K, A> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Appends a subscription, creating the entry if absent.
    pub(crate) fn push(&mut self, key: K, handler: Handler<A>, once: bool) {
        self.entries
            .entry(key)
            .or_default()
            .push(Subscription { handler, once });
    }

    /// Takes the dispatch snapshot for `key`.
    ///
    /// Returns `None` when there is no subscriber. Otherwise returns a copy of
    /// the current list and removes its one-shot subscriptions from the
    /// registry, so no later pass (including a re-entrant one) can run them again.
    pub(crate) fn claim(&mut self, key: &K) -> Option<Vec<Subscription<A>>> {
        let list = self.entries.get_mut(key)?;
        if list.is_empty() {
            self.entries.remove(key);
            return None;
        }

        let snapshot = list.clone();
        if snapshot.iter().any(|s| s.once) {
            list.retain(|s| !s.once);
            if list.is_empty() {
                self.entries.remove(key);
            }
        }
        Some(snapshot)
    }

    /// Removes subscriptions for `key`.
    ///
    /// - `None` drops the whole entry.
    /// - `Some(h)` drops only subscriptions whose handler is `h`.
    ///
    /// Returns the number of subscriptions removed.
    pub(crate) fn remove(&mut self, key: &K, handler: Option<&Handler<A>>) -> usize {
        let Some(list) = self.entries.get_mut(key) else {
            return 0;
        };

        let removed = match handler {
            None => list.len(),
            Some(h) => {
                let before = list.len();
                list.retain(|s| !s.handler.ptr_eq(h));
                before - list.len()
            }
        };

        if handler.is_none() || list.is_empty() {
            self.entries.remove(key);
        }
        removed
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn count(&self, key: &K) -> usize {
        self.entries.get(key).map_or(0, Vec::len)
    }

    pub(crate) fn keys(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
