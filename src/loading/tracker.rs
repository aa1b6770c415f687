//! # LoadingTracker – reference-counted loading indicator
//!
//! Counts overlapping operations that want a loading indicator and broadcasts
//! the indicator state on the bus. UI components that mount after a state
//! change still receive it: the bus buffers triggers nobody listened to.
//!
//! ## Behavior
//! - `open` → count += 1, broadcast *shown*.
//! - `close` → count -= 1 (never below 0); broadcast *hidden* once it reaches 0.
//! - `close_all` → count = 0, broadcast *hidden*.
//! - `change_attr` → merge style, no broadcast.
//!
//! ## Internal scheme
//! ```text
//! open()/close()/close_all()
//!   ├─ lock  ─► update count/style, build LoadingState
//!   ├─ unlock
//!   └─► bus.trigger(key, A::from(state))
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::EventBus;
use crate::events::EventKey;
use crate::loading::state::{LOADING_EVENT, LoadingOptions, LoadingState, LoadingStyle};

struct Inner {
    count: usize,
    style: LoadingStyle,
}

/// Reference-counted loading indicator publishing on an [`EventBus`].
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use eventbus::{EventBus, Handler, LoadingState, LoadingTracker};
///
/// let bus: Arc<EventBus<&'static str, LoadingState>> = Arc::new(EventBus::new());
/// let loading = LoadingTracker::new(Arc::clone(&bus));
///
/// loading.open(None);              // no UI yet: buffered
///
/// let last = Arc::new(Mutex::new(None));
/// let l = Arc::clone(&last);
/// bus.listen(
///     "loading",
///     Handler::new(move |s: &LoadingState| *l.lock().unwrap() = Some(s.visible)),
///     false,
/// );
/// assert_eq!(*last.lock().unwrap(), Some(true));
///
/// loading.close();
/// assert_eq!(*last.lock().unwrap(), Some(false));
/// ```
pub struct LoadingTracker<K, A> {
    bus: Arc<EventBus<K, A>>,
    key: K,
    inner: Mutex<Inner>,
}

impl<A> LoadingTracker<&'static str, A>
where
    A: From<LoadingState>,
{
    /// Creates a tracker publishing on [`LOADING_EVENT`].
    pub fn new(bus: Arc<EventBus<&'static str, A>>) -> Self {
        Self::with_key(bus, LOADING_EVENT)
    }
}

impl<K, A> LoadingTracker<K, A>
where
    K: EventKey,
    A: From<LoadingState>,
{
    /// Creates a tracker publishing on `key`.
    pub fn with_key(bus: Arc<EventBus<K, A>>, key: K) -> Self {
        Self {
            bus,
            key,
            inner: Mutex::new(Inner {
                count: 0,
                style: LoadingStyle::default(),
            }),
        }
    }

    /// Registers one more in-flight operation and broadcasts the shown state.
    pub fn open(&self, options: Option<LoadingOptions>) {
        let state = {
            let mut inner = self.lock();
            inner.count += 1;
            if let Some(options) = options {
                inner.style.merge(options);
            }
            LoadingState::shown(&inner.style)
        };
        self.publish(state);
    }

    /// Finishes one operation; broadcasts the hidden state when none remain.
    pub fn close(&self) {
        let state = {
            let mut inner = self.lock();
            inner.count = inner.count.saturating_sub(1);
            if inner.count > 0 {
                return;
            }
            LoadingState::hidden(&inner.style)
        };
        self.publish(state);
    }

    /// Forgets every in-flight operation and broadcasts the hidden state.
    pub fn close_all(&self) {
        let state = {
            let mut inner = self.lock();
            inner.count = 0;
            LoadingState::hidden(&inner.style)
        };
        self.publish(state);
    }

    /// Updates the style used by later broadcasts.
    pub fn change_attr(&self, options: LoadingOptions) {
        self.lock().style.merge(options);
    }

    /// Number of in-flight operations.
    pub fn count(&self) -> usize {
        self.lock().count
    }

    /// Returns `true` while at least one operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.count() > 0
    }

    /// Current style.
    pub fn style(&self) -> LoadingStyle {
        self.lock().style.clone()
    }

    /// Event key this tracker publishes on.
    pub fn key(&self) -> &K {
        &self.key
    }

    fn publish(&self, state: LoadingState) {
        tracing::trace!(event = ?self.key, visible = state.visible, "loading state changed");
        self.bus.trigger(self.key.clone(), A::from(state));
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Handler;

    type States = Arc<Mutex<Vec<LoadingState>>>;

    type Bus = EventBus<&'static str, LoadingState>;

    fn setup() -> (Arc<Bus>, LoadingTracker<&'static str, LoadingState>) {
        let bus = Arc::new(EventBus::new());
        let tracker = LoadingTracker::new(Arc::clone(&bus));
        (bus, tracker)
    }

    fn watch(bus: &Bus) -> States {
        let states: States = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&states);
        bus.listen(
            LOADING_EVENT,
            Handler::new(move |st: &LoadingState| s.lock().unwrap().push(st.clone())),
            false,
        );
        states
    }

    fn visibility(states: &States) -> Vec<bool> {
        states.lock().unwrap().iter().map(|s| s.visible).collect()
    }

    #[test]
    fn test_nested_open_close() {
        let (bus, loading) = setup();
        let states = watch(&bus);

        loading.open(None);
        loading.open(None);
        assert_eq!(loading.count(), 2);

        loading.close();
        assert!(loading.is_loading());
        assert_eq!(visibility(&states), vec![true, true]);

        loading.close();
        assert!(!loading.is_loading());
        assert_eq!(visibility(&states), vec![true, true, false]);
    }

    #[test]
    fn test_close_below_zero_clamps_and_hides() {
        let (bus, loading) = setup();
        let states = watch(&bus);

        loading.close();
        assert_eq!(loading.count(), 0);
        assert_eq!(visibility(&states), vec![false]);
    }

    #[test]
    fn test_close_all_resets_count() {
        let (bus, loading) = setup();
        let states = watch(&bus);

        loading.open(None);
        loading.open(None);
        loading.close_all();

        assert_eq!(loading.count(), 0);
        assert_eq!(visibility(&states), vec![true, true, false]);
    }

    #[test]
    fn test_late_ui_receives_missed_changes() {
        let (bus, loading) = setup();

        loading.open(Some(LoadingOptions::default().with_text("Saving...")));
        loading.close();
        assert_eq!(bus.buffered_count(&LOADING_EVENT), 2);

        let states = watch(&bus);
        assert_eq!(visibility(&states), vec![true, false]);
        assert_eq!(states.lock().unwrap()[0].text, "Saving...");
    }

    #[test]
    fn test_change_attr_applies_to_next_broadcast() {
        let (bus, loading) = setup();
        let states = watch(&bus);

        loading.change_attr(LoadingOptions::default().with_background("#fff"));
        assert!(states.lock().unwrap().is_empty());

        loading.open(None);
        assert_eq!(states.lock().unwrap()[0].background, "#fff");
        assert_eq!(loading.style().background, "#fff");
    }

    #[test]
    fn test_custom_key_and_payload() {
        #[derive(Debug)]
        enum Ui {
            Loading(bool),
        }

        impl From<LoadingState> for Ui {
            fn from(s: LoadingState) -> Self {
                Ui::Loading(s.visible)
            }
        }

        let bus: Arc<EventBus<String, Ui>> = Arc::new(EventBus::new());
        let loading = LoadingTracker::with_key(Arc::clone(&bus), "spinner".to_string());
        loading.open(None);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        bus.listen(
            "spinner".to_string(),
            Handler::new(move |ui: &Ui| {
                let Ui::Loading(on) = ui;
                s.lock().unwrap().push(*on);
            }),
            false,
        );

        assert_eq!(*seen.lock().unwrap(), vec![true]);
        assert_eq!(loading.key(), "spinner");
    }
}
