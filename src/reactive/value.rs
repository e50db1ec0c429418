//! Observable shared values.
//!
//! A [`SharedValue`] stores one value and lets any number of observers
//! subscribe through a `tokio::sync::watch` receiver. Writes only notify when
//! the value actually changes (by `PartialEq`), so observers never see
//! redundant updates.

use std::fmt;

use tokio::sync::watch;

/// A single observable value.
pub struct SharedValue<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> SharedValue<T> {
    /// Create a shared value with the given initial value.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Read by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Overwrite the value. Returns `true` if it changed.
    ///
    /// Works with or without live subscribers.
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        })
    }

    /// Subscribe to future changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + PartialEq + Default> Default for SharedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedValue")
            .field("value", &*self.tx.borrow())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
