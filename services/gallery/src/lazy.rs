//! Visibility-driven image loading
//!
//! Each subscription fires at most once: the first intersecting event runs
//! its callback and drops it.

use std::collections::HashMap;
use std::hash::Hash;

/// Callback run when a subscribed element becomes visible
pub type RevealCallback = Box<dyn FnOnce() + Send>;

/// One-shot visibility subscriptions keyed by element
pub struct VisibilityObserver<K> {
    subscriptions: HashMap<K, RevealCallback>,
}

impl<K: Eq + Hash> Default for VisibilityObserver<K> {
    fn default() -> Self {
        Self {
            subscriptions: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> VisibilityObserver<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `key`; replaces an existing subscription for the same key
    pub fn observe(&mut self, key: K, callback: RevealCallback) {
        self.subscriptions.insert(key, callback);
    }

    /// Deliver a visibility event; returns whether a callback ran
    pub fn notify(&mut self, key: &K, intersecting: bool) -> bool {
        if !intersecting {
            return false;
        }

        match self.subscriptions.remove(key) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.subscriptions.contains_key(key)
    }

    /// Drop every subscription
    pub fn disconnect(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, RevealCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (
            count,
            Box::new(move || {
                handle.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_fires_once_on_intersection() {
        let mut observer = VisibilityObserver::new();
        let (count, callback) = counter();
        observer.observe(1usize, callback);

        assert!(!observer.notify(&1, false));
        assert!(observer.is_observing(&1));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert!(observer.notify(&1, true));
        assert!(!observer.notify(&1, true));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(observer.is_empty());
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut observer: VisibilityObserver<usize> = VisibilityObserver::new();
        assert!(!observer.notify(&7, true));
    }

    #[test]
    fn test_disconnect_drops_subscriptions() {
        let mut observer = VisibilityObserver::new();
        let (count, callback) = counter();
        observer.observe("card-0", callback);
        assert_eq!(observer.len(), 1);

        observer.disconnect();

        assert!(!observer.notify(&"card-0", true));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
