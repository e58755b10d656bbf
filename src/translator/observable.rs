//! Observable snapshot cell with change notification.
//!
//! [`Observable<T>`] holds a value in shared storage (`Arc<RwLock<..>>`).
//! Setting a value that differs from the current one (by `PartialEq`) bumps
//! the version and notifies every live subscriber in registration order.
//!
//! Subscribers are kept as `Weak` callbacks; the matching strong reference
//! lives in the [`Subscription`] guard, so dropping the guard unsubscribes.
//! Dead entries are pruned lazily on the next notification.
//!
//! Locks are released before callbacks run, so subscribers may read from or
//! write to the observable.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

type CallbackArc<T> = Arc<dyn Fn(&T) + Send + Sync>;
type CallbackWeak<T> = Weak<dyn Fn(&T) + Send + Sync>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates another handle to the same state.
pub struct Observable<T> {
    inner: Arc<RwLock<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Observable<T> {
    /// Create an observable with version 0 and no subscribers
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }

    /// Replace the value. Equal values are a no-op; otherwise the version is
    /// bumped and subscribers are notified.
    pub fn set(&self, value: T) {
        self.update(move |_| value);
    }

    /// Derive the next value from the current one and store it.
    ///
    /// `f` runs under the write lock, so concurrent updates never overwrite
    /// each other. It must not access this observable.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            let next = f(&inner.value);
            if inner.value == next {
                return;
            }
            inner.value = next;
            inner.version += 1;
        }
        self.notify();
    }

    /// Subscribe to changes. The callback receives the new value.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let strong: CallbackArc<T> = Arc::new(callback);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .push(Arc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of value-changing mutations so far
    pub fn version(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).version
    }

    /// Registered subscribers, including dead ones not yet pruned
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .len()
    }

    fn notify(&self) {
        let (callbacks, value): (Vec<CallbackArc<T>>, T) = {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks = inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (callbacks, inner.value.clone())
        };

        for callback in &callbacks {
            callback(&value);
        }
    }
}

/// Guard keeping a subscriber callback alive.
///
/// Dropping it makes the callback unreachable from the observable.
pub struct Subscription {
    _guard: Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
