//! # Deferred buffer for orphaned triggers.
//!
//! A trigger that finds no subscriber is recorded here, per key, in arrival
//! order. The first `listen` on that key takes the whole list and replays it.
//!
//! ## Rules
//! - FIFO per key; keys are independent.
//! - An entry exists only while its list is non-empty.
//! - With a configured limit, pushing onto a full list evicts the oldest call.

use std::collections::{HashMap, VecDeque};

use crate::events::EventKey;

/// A trigger invocation recorded because no subscriber existed at trigger time.
pub(crate) struct BufferedCall<K, A> {
    pub(crate) key: K,
    pub(crate) args: A,
}

/// Event key → buffered calls, oldest first.
pub(crate) struct DeferredBuffer<K, A> {
    entries: HashMap<K, VecDeque<BufferedCall<K, A>>>,
    limit: Option<usize>,
}

impl<K: EventKey, A> DeferredBuffer<K, A> {
    /// Creates an empty buffer; `limit` bounds each key's list.
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            limit: limit.map(|n| n.max(1)),
        }
    }

    /// Records a call. Returns the evicted call when the key's list was full.
    pub(crate) fn push(&mut self, key: K, args: A) -> Option<BufferedCall<K, A>> {
        let list = self.entries.entry(key.clone()).or_default();
        let evicted = match self.limit {
            Some(limit) if list.len() >= limit => list.pop_front(),
            _ => None,
        };
        list.push_back(BufferedCall { key, args });
        evicted
    }

    /// Removes and returns every buffered call for `key`, oldest first.
    pub(crate) fn take(&mut self, key: &K) -> VecDeque<BufferedCall<K, A>> {
        self.entries.remove(key).unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn count(&self, key: &K) -> usize {
        self.entries.get(key).map_or(0, VecDeque::len)
    }

    pub(crate) fn keys(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(calls: VecDeque<BufferedCall<&'static str, u32>>) -> Vec<u32> {
        calls.into_iter().map(|c| c.args).collect()
    }

    #[test]
    fn test_take_is_fifo_and_empties_key() {
        let mut buf = DeferredBuffer::new(None);
        buf.push("x", 1);
        buf.push("x", 2);
        buf.push("y", 9);

        assert_eq!(args(buf.take(&"x")), vec![1, 2]);
        assert_eq!(buf.count(&"x"), 0);
        assert_eq!(buf.keys(), vec!["y"]);
        assert!(buf.take(&"x").is_empty());
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut buf = DeferredBuffer::new(Some(2));
        assert!(buf.push("x", 1).is_none());
        assert!(buf.push("x", 2).is_none());

        let evicted = buf.push("x", 3).map(|c| c.args);
        assert_eq!(evicted, Some(1));
        assert_eq!(args(buf.take(&"x")), vec![2, 3]);
    }

    #[test]
    fn test_call_keeps_its_key() {
        let mut buf = DeferredBuffer::new(None);
        buf.push("ready", 1_u32);

        let call = buf.take(&"ready").pop_front().unwrap();
        assert_eq!(call.key, "ready");
        assert_eq!(call.args, 1);
    }

    #[test]
    fn test_clear() {
        let mut buf = DeferredBuffer::new(None);
        buf.push("x", 1_u32);
        buf.push("y", 2);
        buf.clear();

        assert!(buf.is_empty());
    }
}
