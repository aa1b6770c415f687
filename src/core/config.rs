//! # Bus configuration.
//!
//! Provides [`BusConfig`] settings for a single [`EventBus`](crate::EventBus) instance.
//!
//! ## Sentinel values
//! - `buffer_capacity = 0` → unbounded deferred buffer (no eviction)

use std::borrow::Cow;

/// Configuration for one event bus.
///
/// ## Field semantics
/// - `name`: Label attached to every log record of this bus
/// - `buffer_capacity`: Per-key deferred buffer bound (`0` = unbounded)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Bus label used in logs.
    ///
    /// Lets independent buses in one process be told apart in log output.
    pub name: Cow<'static, str>,

    /// Maximum number of buffered calls kept per event key.
    ///
    /// - `0` = unbounded: every orphaned trigger is kept until a subscriber appears
    /// - `n > 0` = at most `n` calls per key; when full, the **oldest** call for
    ///   that key is evicted and a warning is logged
    pub buffer_capacity: usize,
}

impl BusConfig {
    /// Creates a default configuration with the given bus label.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the per-key buffer bound as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` buffered calls per key
    #[inline]
    pub fn buffer_limit(&self) -> Option<usize> {
        if self.buffer_capacity == 0 {
            None
        } else {
            Some(self.buffer_capacity)
        }
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `name = "default"`
    /// - `buffer_capacity = 0` (unbounded)
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("default"),
            buffer_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let cfg = BusConfig::default();
        assert_eq!(cfg.name, "default");
        assert_eq!(cfg.buffer_limit(), None);
    }

    #[test]
    fn test_buffer_limit_sentinel() {
        let cfg = BusConfig {
            buffer_capacity: 8,
            ..BusConfig::named("ui")
        };
        assert_eq!(cfg.name, "ui");
        assert_eq!(cfg.buffer_limit(), Some(8));
    }
}
