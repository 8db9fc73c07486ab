//! Process wide "allow drop anywhere" switch, held only while a drag is in progress.
//!
//! Every list registers one listener when its drag starts and gets back a [`DragOverGuard`].
//! Dropping the guard unregisters that listener and nothing else, so overlapping drags on
//! different lists cannot release each other.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Registry {
    next_token: u64,
    active: BTreeSet<u64>,
}

/// Shared set of drag-over listeners. Cloning yields another handle to the same set.
#[derive(Clone, Debug, Default)]
pub struct DragOverListeners {
    registry: Arc<Mutex<Registry>>,
}

impl DragOverListeners {
    fn lock(&self) -> MutexGuard<'_, Registry> {
        // the registry is a plain set, a panic while holding it cannot leave it half updated
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new listener, which stays active until the returned guard is dropped.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn acquire(&self) -> DragOverGuard {
        let mut registry = self.lock();
        let token = registry.next_token;
        registry.next_token += 1;
        registry.active.insert(token);
        log::trace!("drag-over listener {token} registered");

        DragOverGuard {
            listeners: self.clone(),
            token,
        }
    }

    /// `true` while at least one listener is registered.
    pub fn is_suppressed(&self) -> bool {
        !self.lock().active.is_empty()
    }

    /// Number of registered listeners.
    pub fn active(&self) -> usize {
        self.lock().active.len()
    }
}

/// Keeps one drag-over listener registered for as long as it lives.
#[derive(Debug)]
pub struct DragOverGuard {
    listeners: DragOverListeners,
    token: u64,
}

impl Drop for DragOverGuard {
    fn drop(&mut self) {
        self.listeners.lock().active.remove(&self.token);
        log::trace!("drag-over listener {} removed", self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_controls_suppression() {
        let listeners = DragOverListeners::default();
        assert!(!listeners.is_suppressed());

        let guard = listeners.acquire();
        assert!(listeners.is_suppressed());

        drop(guard);
        assert!(!listeners.is_suppressed());
    }

    #[test]
    fn guards_release_independently() {
        let listeners = DragOverListeners::default();
        let first = listeners.acquire();
        let second = listeners.clone().acquire();
        assert_eq!(listeners.active(), 2);

        drop(first);
        assert_eq!(listeners.active(), 1);
        assert!(listeners.is_suppressed());

        drop(second);
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn separate_registries_do_not_share() {
        let a = DragOverListeners::default();
        let b = DragOverListeners::default();
        let _guard = a.acquire();
        assert!(a.is_suppressed());
        assert!(!b.is_suppressed());
    }
}
