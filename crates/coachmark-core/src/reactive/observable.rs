#![forbid(unsafe_code)]

//! Observable value wrapper with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). When the value changes (determined by
//! `PartialEq`), all live subscribers are notified in registration order.
//! The overlay uses it for the animatable highlight size and position: one
//! writer (the animation coordinator), any number of read-only listeners.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: If `Subscription` guards are stored indefinitely
//!   without being dropped, callbacks accumulate. Dead weak references are
//!   cleaned lazily during `notify()`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{trace, trace_span};
use web_time::Instant;

/// A subscriber callback stored as a strong `Rc` internally, handed out
/// as `Weak` to the observable.
pub type Listener<T> = Rc<dyn Fn(&T)>;
type ListenerWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    /// Subscribers stored as weak references. Dead entries are pruned on notify.
    subscribers: Vec<ListenerWeak<T>>,
}

/// A shared value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state.
///
/// # Invariants
///
/// 1. `set(v)` where `v == current` is a no-op.
/// 2. Subscribers are notified in registration order.
/// 3. Dead subscribers (dropped [`Subscription`] guards) are pruned lazily.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Set a new value. Returns `true` if the value changed (and
    /// subscribers were notified or queued on the active batch).
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
        }
        self.notify();
        true
    }

    /// Subscribe to value changes.
    ///
    /// Returns a [`Subscription`] guard. Dropping the guard unsubscribes
    /// the callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe_shared(Rc::new(callback))
    }

    /// Subscribe an already shared listener.
    ///
    /// The same listener may be attached to several observables; inside a
    /// [`BatchScope`](super::BatchScope) it then fires at most once no
    /// matter how many of them changed.
    pub fn subscribe_shared(&self, listener: Listener<T>) -> Subscription {
        let weak = Rc::downgrade(&listener);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(listener),
        }
    }

    fn notify(&self) {
        let callbacks: Vec<Listener<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        if super::batch::is_batching() {
            for cb in callbacks {
                let key = Rc::as_ptr(&cb) as *const () as usize;
                let source = self.clone();
                super::batch::defer_or_run_keyed(key, move || {
                    let latest = source.get();
                    cb(&latest);
                });
            }
            return;
        }

        let value = self.inner.borrow().value.clone();
        let start = Instant::now();
        let _span = trace_span!("observable.notify", listeners = callbacks.len()).entered();
        for cb in &callbacks {
            cb(&value);
        }
        trace!(duration_us = start.elapsed().as_micros() as u64, "observable propagated");
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` drops the strong `Rc`, so the `Weak` held by
/// the observable fails to upgrade on the next notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::reactive::BatchScope;
    use std::cell::Cell;

    #[test]
    fn get_set_basic() {
        let obs = Observable::new(42);
        assert_eq!(obs.get(), 42);

        assert!(obs.set(99));
        assert_eq!(obs.get(), 99);
    }

    #[test]
    fn unchanged_set_does_not_notify() {
        let obs = Observable::new(Vec2::new(1.0, 2.0));
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = obs.subscribe(move |_: &Vec2| count_clone.set(count_clone.get() + 1));

        assert!(!obs.set(Vec2::new(1.0, 2.0)));
        assert_eq!(count.get(), 0);
        assert!(obs.set(Vec2::new(5.0, 2.0)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn subscriber_receives_new_value() {
        let obs = Observable::new(0);
        let last_seen = Rc::new(Cell::new(0));
        let last_clone = Rc::clone(&last_seen);

        let _sub = obs.subscribe(move |val| last_clone.set(*val));

        obs.set(42);
        assert_eq!(last_seen.get(), 42);
        obs.set(42);
        assert_eq!(last_seen.get(), 42);
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);

        let sub = obs.subscribe(move |_| count_clone.set(count_clone.get() + 1));
        obs.set(1);
        assert_eq!(count.get(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn notification_order_is_registration_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log1 = Rc::clone(&log);
        let _s1 = obs.subscribe(move |_| log1.borrow_mut().push('A'));
        let log2 = Rc::clone(&log);
        let _s2 = obs.subscribe(move |_| log2.borrow_mut().push('B'));

        obs.set(1);
        assert_eq!(*log.borrow(), vec!['A', 'B']);
    }

    #[test]
    fn shared_listener_fires_once_per_batch() {
        let size = Observable::new(Vec2::ZERO);
        let position = Observable::new(Vec2::ZERO);
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let listener: Listener<Vec2> = Rc::new(move |_: &Vec2| hits_clone.set(hits_clone.get() + 1));

        let _a = size.subscribe_shared(Rc::clone(&listener));
        let _b = position.subscribe_shared(listener);

        {
            let _batch = BatchScope::new();
            size.set(Vec2::new(10.0, 10.0));
            position.set(Vec2::new(5.0, 5.0));
            assert_eq!(hits.get(), 0);
        }
        assert_eq!(hits.get(), 1);

        // Outside a batch each change notifies on its own.
        size.set(Vec2::new(20.0, 20.0));
        position.set(Vec2::new(6.0, 6.0));
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn clone_shares_state() {
        let a = Observable::new(0);
        let b = a.clone();
        a.set(7);
        assert_eq!(b.get(), 7);
    }

    #[test]
    fn debug_format() {
        let obs = Observable::new(42);
        let dbg = format!("{obs:?}");
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("42"));
    }
}
