//! Change listeners keyed by subscription handle.
//!
//! Listeners are removed by handle, never by comparing closures, so the same
//! closure registered twice gets two independent subscriptions.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    // BTreeMap keeps notification in subscription order
    listeners: BTreeMap<u64, Listener>,
}

#[derive(Default)]
pub struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Arc::new(listener));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
            active: AtomicBool::new(true),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every listener registered at the moment of firing.
    ///
    /// The registry lock is released before any listener runs. A listener
    /// unsubscribed by an earlier one in the same round is skipped; one added
    /// during the round waits for the next.
    pub fn notify(&self) {
        let round: Vec<(u64, Listener)> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        for (id, listener) in round {
            let still_registered = lock(&self.registry).listeners.contains_key(&id);
            if still_registered {
                listener();
            }
        }
    }
}

/// Handle returned by `subscribe`. Dropping it does not unsubscribe.
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
    active: AtomicBool,
}

impl Subscription {
    /// Remove this listener. Calls after the first do nothing.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).listeners.remove(&self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// Listeners never run under the lock, so a poisoned registry still holds
// consistent data.
fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_each_listener_called_once_per_notify() {
        let subscribers = Subscribers::new();
        let (a, listener_a) = counter();
        let (b, listener_b) = counter();
        let _sa = subscribers.subscribe(listener_a);
        let _sb = subscribers.subscribe(listener_b);

        subscribers.notify();

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_same_closure_twice_registers_twice() {
        let subscribers = Subscribers::new();
        let count = Arc::new(AtomicUsize::new(0));
        let listener = {
            let c = Arc::clone(&count);
            Arc::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
        };

        let first = {
            let l = Arc::clone(&listener);
            subscribers.subscribe(move || l())
        };
        let _second = {
            let l = Arc::clone(&listener);
            subscribers.subscribe(move || l())
        };

        subscribers.notify();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        first.unsubscribe();
        first.unsubscribe();
        assert_eq!(subscribers.len(), 1);

        subscribers.notify();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_listener_removed_mid_round_is_skipped() {
        let subscribers = Arc::new(Subscribers::new());
        let victim_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&victim_slot);
        let _remover = subscribers.subscribe(move || {
            if let Some(sub) = slot.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });

        let (victim_calls, victim) = counter();
        *victim_slot.lock().unwrap() = Some(subscribers.subscribe(victim));

        subscribers.notify();

        assert_eq!(victim_calls.load(Ordering::SeqCst), 0);
        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn test_listener_added_mid_round_waits_for_next_round() {
        let subscribers = Arc::new(Subscribers::new());
        let (late_calls, _) = counter();
        let added: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

        let subs = Arc::clone(&subscribers);
        let late = Arc::clone(&late_calls);
        let store = Arc::clone(&added);
        let _adder = subscribers.subscribe(move || {
            let mut added = store.lock().unwrap();
            if added.is_empty() {
                let late = Arc::clone(&late);
                added.push(subs.subscribe(move || {
                    late.fetch_add(1, Ordering::SeqCst);
                }));
            }
        });

        subscribers.notify();
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        subscribers.notify();
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped_is_noop() {
        let subscribers = Subscribers::new();
        let sub = subscribers.subscribe(|| {});
        drop(subscribers);

        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
