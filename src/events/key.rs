//! # Event keys.
//!
//! Every subscription and every buffered call is grouped under a key. Two keys
//! name the same event if and only if they compare equal.
//!
//! [`EventKey`] is the bound the bus places on keys. It is implemented for the
//! common string types, for the closed [`EventName`] type and for [`Symbol`]
//! tokens. Applications with a fixed set of events usually implement it for
//! their own enum:
//!
//! ```rust
//! use eventbus::EventKey;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum UiEvent {
//!     Loading,
//!     SessionExpired,
//! }
//!
//! impl EventKey for UiEvent {}
//! ```

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Global counter handing out symbol identities.
static SYMBOL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Identifier under which subscriptions and buffered calls are grouped.
pub trait EventKey: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {
    /// Returns `true` for keys that must never be registered (e.g. empty strings).
    ///
    /// `listen` and `remove` silently ignore blank keys.
    fn is_blank(&self) -> bool {
        false
    }
}

impl EventKey for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl EventKey for &'static str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl EventKey for Arc<str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl EventKey for Cow<'static, str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Unique, symbol-like event token.
///
/// Every call to [`Symbol::new`] yields a token that is equal only to itself and
/// its clones. The description is for humans and does not take part in equality.
///
/// ```rust
/// use eventbus::Symbol;
///
/// let a = Symbol::new("refresh");
/// let b = Symbol::new("refresh");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Cow<'static, str>,
}

impl Symbol {
    /// Creates a fresh token.
    pub fn new(description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: SYMBOL_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            description: description.into(),
        }
    }

    /// Human-readable description given at construction.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

impl EventKey for Symbol {}

/// Closed event key type: a string name or a [`Symbol`].
///
/// A name and a symbol never compare equal, even when the symbol's
/// description matches the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Named event, e.g. `"loading"`.
    Name(Cow<'static, str>),
    /// Token event.
    Symbol(Symbol),
}

impl EventName {
    /// Returns the name for [`EventName::Name`], `None` for symbols.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            EventName::Name(name) => Some(name),
            EventName::Symbol(_) => None,
        }
    }
}

impl EventKey for EventName {
    fn is_blank(&self) -> bool {
        match self {
            EventName::Name(name) => name.is_empty(),
            EventName::Symbol(_) => false,
        }
    }
}

impl From<&'static str> for EventName {
    fn from(name: &'static str) -> Self {
        EventName::Name(Cow::Borrowed(name))
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        EventName::Name(Cow::Owned(name))
    }
}

impl From<Symbol> for EventName {
    fn from(symbol: Symbol) -> Self {
        EventName::Symbol(symbol)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventName::Name(name) => f.write_str(name),
            EventName::Symbol(symbol) => fmt::Display::fmt(symbol, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_string_keys() {
        assert!(String::new().is_blank());
        assert!("".is_blank());
        assert!(Arc::<str>::from("").is_blank());
        assert!(!"ready".is_blank());
        assert!(!String::from("ready").is_blank());
    }

    #[test]
    fn test_symbols_are_unique_per_construction() {
        let a = Symbol::new("tick");
        let b = Symbol::new("tick");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.description(), "tick");
        assert!(!a.is_blank());
    }

    #[test]
    fn test_event_name_equality() {
        let sym = Symbol::new("ready");
        assert_eq!(EventName::from("ready"), EventName::from(String::from("ready")));
        assert_ne!(EventName::from("ready"), EventName::from(sym.clone()));
        assert_eq!(EventName::from(sym.clone()), EventName::Symbol(sym));
    }

    #[test]
    fn test_event_name_blank_and_display() {
        assert!(EventName::from("").is_blank());
        assert!(!EventName::from(Symbol::new("")).is_blank());
        assert_eq!(EventName::from("loading").to_string(), "loading");
        assert_eq!(EventName::from("loading").as_name(), Some("loading"));
        assert_eq!(EventName::from(Symbol::new("x")).to_string(), "Symbol(x)");
    }
}
