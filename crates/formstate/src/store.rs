//! Synchronous notify-on-write store.
//!
//! `set` and `update` deliver the new value to every subscriber, in
//! subscription order, before returning. There is no batching.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type SubscriptionId = u64;

type Listener<T> = Box<dyn FnMut(&T) + Send>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A value cell with subscribers.
///
/// Listeners run on the thread that wrote the value. A listener must not
/// subscribe to, unsubscribe from, or write to the store that is notifying
/// it; reading other stores is fine.
pub struct Store<T> {
    value: Mutex<T>,
    next_listener_id: AtomicU64,
    listeners: Mutex<BTreeMap<SubscriptionId, Listener<T>>>,
}

impl<T: Clone + Send> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            next_listener_id: AtomicU64::new(1),
            listeners: Mutex::new(BTreeMap::new()),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        *lock(&self.value) = value.clone();
        self.emit(&value);
    }

    /// Computes the next value from the current one and stores it.
    ///
    /// The read and the write happen under one lock, so concurrent updates
    /// cannot interleave.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = {
            let mut guard = lock(&self.value);
            let next = f(&guard);
            *guard = next.clone();
            next
        };
        self.emit(&next);
    }

    /// Like [`update`](Self::update), but leaves the value untouched and
    /// notifies nobody if `f` fails.
    pub fn try_update<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let next = {
            let mut guard = lock(&self.value);
            let next = f(&guard)?;
            *guard = next.clone();
            next
        };
        self.emit(&next);
        Ok(())
    }

    /// Registers `listener`, calling it right away with the current value.
    pub fn subscribe<F>(&self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let current = self.get();
        listener(&current);
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).insert(id, Box::new(listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.listeners).remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    fn emit(&self, value: &T) {
        for listener in lock(&self.listeners).values_mut() {
            listener(value);
        }
    }
}

impl<T: Clone + Send + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &*lock(&self.value))
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
