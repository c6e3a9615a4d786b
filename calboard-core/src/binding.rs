//! Per-view adapter over a shared `EventStore`.
//!
//! A `StoreBinding` keeps a local mirror of the store's events that is
//! replaced wholesale on every store notification. Views read the mirror and
//! send edits through the pass-through helpers, which forward to the store
//! unchanged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::event::{CalendarEvent, EventPatch, NewEvent};
use crate::store::EventStore;
use crate::subscribers::Subscription;

type ChangeHook = Box<dyn Fn(&[CalendarEvent]) + Send + Sync>;

struct Mirrored {
    version: u64,
    events: Vec<CalendarEvent>,
}

struct Mirror {
    current: RwLock<Mirrored>,
    revision: AtomicU64,
}

impl Mirror {
    fn new(version: u64, events: Vec<CalendarEvent>) -> Self {
        Mirror {
            current: RwLock::new(Mirrored { version, events }),
            revision: AtomicU64::new(1),
        }
    }

    /// Install a snapshot unless the mirror already holds one at least as
    /// new. Listeners from concurrent mutations can finish out of order, so
    /// an older snapshot may arrive after a newer one.
    fn replace(&self, version: u64, events: Vec<CalendarEvent>) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if version <= current.version {
            return false;
        }
        *current = Mirrored { version, events };
        self.revision.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn snapshot(&self) -> Vec<CalendarEvent> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .clone()
    }

    fn version(&self) -> u64 {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .version
    }
}

pub struct StoreBinding {
    store: Arc<EventStore>,
    mirror: Arc<Mirror>,
    subscription: Option<Subscription>,
}

impl StoreBinding {
    pub fn attach(store: Arc<EventStore>) -> Self {
        Self::subscribe(store, None)
    }

    /// Attach and call `on_change` with the refreshed events after every
    /// store notification.
    pub fn attach_with<F>(store: Arc<EventStore>, on_change: F) -> Self
    where
        F: Fn(&[CalendarEvent]) + Send + Sync + 'static,
    {
        Self::subscribe(store, Some(Box::new(on_change)))
    }

    fn subscribe(store: Arc<EventStore>, on_change: Option<ChangeHook>) -> Self {
        let (version, events) = store.events_versioned();
        let mirror = Arc::new(Mirror::new(version, events));

        let weak_store: Weak<EventStore> = Arc::downgrade(&store);
        let weak_mirror: Weak<Mirror> = Arc::downgrade(&mirror);

        let subscription = store.subscribe(move || {
            let (Some(store), Some(mirror)) = (weak_store.upgrade(), weak_mirror.upgrade()) else {
                return;
            };

            let (version, events) = store.events_versioned();
            match &on_change {
                Some(hook) => {
                    if mirror.replace(version, events.clone()) {
                        hook(&events);
                    }
                }
                None => {
                    mirror.replace(version, events);
                }
            }
        });

        // Catch a mutation that landed between the first snapshot and subscribing
        let (version, events) = store.events_versioned();
        mirror.replace(version, events);

        StoreBinding {
            store,
            mirror,
            subscription: Some(subscription),
        }
    }

    /// The mirrored events as of the last notification.
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.mirror.snapshot()
    }

    /// Number of times the mirror has been filled, starting at 1 on attach.
    pub fn revision(&self) -> u64 {
        self.mirror.revision.load(Ordering::SeqCst)
    }

    /// Store version of the mirrored snapshot.
    pub fn version(&self) -> u64 {
        self.mirror.version()
    }

    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop following the store. The mirror keeps its last contents.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn add_event(&self, event: NewEvent) -> CalendarEvent {
        self.store.add_event(event)
    }

    pub fn update_event(&self, id: &str, patch: EventPatch) -> bool {
        self.store.update_event(id, patch)
    }

    pub fn delete_event(&self, id: &str) -> bool {
        self.store.delete_event(id)
    }

    pub fn clear_all_events(&self) {
        self.store.clear_all_events()
    }

    pub fn reset_to_sample_data(&self) {
        self.store.reset_to_sample_data()
    }
}

impl Drop for StoreBinding {
    fn drop(&mut self) {
        self.detach();
    }
}
