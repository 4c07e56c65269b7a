//! Value cells with change notification.
use std::fmt;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn Fn(&T)>;

/// A value that notifies subscribers every time it is set.
///
/// Subscribers run synchronously, in subscription order, after the new value
/// is stored. Setting an equal value still notifies.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use project_builder::settings::observable::Observable;
///
/// let seen = Rc::new(Cell::new(0));
/// let mut width = Observable::new(1900);
/// let sink = Rc::clone(&seen);
/// width.subscribe(move |value| sink.set(*value));
///
/// width.set(1280);
/// assert_eq!(*width.get(), 1280);
/// assert_eq!(seen.get(), 1280);
/// ```
pub struct Observable<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
}

impl<T> Observable<T> {
    /// Create a cell holding `value` with no subscribers.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Store `value` and notify every subscriber.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for (_, callback) in &self.subscribers {
            callback(&self.value);
        }
    }

    /// Register `callback` to run after every [`set`](Self::set).
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
