use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Subscribers to surface-wide events (pointer release/cancel/move).
///
/// Subscribing hands out a [`ListenerGuard`]; dropping the guard removes the
/// subscription. Widgets keep the guard for as long as they are attached, so
/// detaching a widget can never leave a handler pointing at it.
pub struct WindowListeners<K: Copy + Eq> {
    subscribers: Rc<RefCell<Vec<K>>>,
}

impl<K: Copy + Eq> WindowListeners<K> {
    pub fn new() -> Self {
        Self { subscribers: Rc::new(RefCell::new(Vec::new())) }
    }

    /// Register `key` until the returned guard is dropped.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(&self, key: K) -> ListenerGuard<K> {
        self.subscribers.borrow_mut().push(key);
        ListenerGuard { key, registry: Rc::downgrade(&self.subscribers) }
    }

    /// Current subscribers in registration order.
    ///
    /// Returned by value so handlers may subscribe/unsubscribe while the host
    /// iterates.
    pub fn snapshot(&self) -> Vec<K> {
        self.subscribers.borrow().clone()
    }

    pub fn contains(&self, key: K) -> bool {
        self.subscribers.borrow().contains(&key)
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }
}

impl<K: Copy + Eq> Default for WindowListeners<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped subscription returned by [`WindowListeners::subscribe`].
pub struct ListenerGuard<K: Copy + Eq> {
    key: K,
    registry: Weak<RefCell<Vec<K>>>,
}

impl<K: Copy + Eq> ListenerGuard<K> {
    #[inline]
    pub fn key(&self) -> K {
        self.key
    }
}

impl<K: Copy + Eq> Drop for ListenerGuard<K> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut subs = registry.borrow_mut();
            if let Some(i) = subs.iter().position(|k| *k == self.key) {
                subs.remove(i);
            }
        }
    }
}

impl<K: Copy + Eq + fmt::Debug> fmt::Debug for ListenerGuard<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_drop_unsubscribes() {
        let listeners = WindowListeners::new();
        let a = listeners.subscribe(1u32);
        let b = listeners.subscribe(2u32);
        assert_eq!(listeners.snapshot(), vec![1, 2]);
        drop(a);
        assert_eq!(listeners.snapshot(), vec![2]);
        drop(b);
        assert!(listeners.is_empty());
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let listeners = WindowListeners::new();
        let guard = listeners.subscribe(9u32);
        drop(listeners);
        assert_eq!(guard.key(), 9);
        drop(guard);
    }

    #[test]
    fn duplicate_subscriptions_are_released_one_at_a_time() {
        let listeners = WindowListeners::new();
        let first = listeners.subscribe(4u32);
        let _second = listeners.subscribe(4u32);
        drop(first);
        assert!(listeners.contains(4));
        assert_eq!(listeners.len(), 1);
    }
}
