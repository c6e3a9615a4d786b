//! The shared event store.
//!
//! `EventStore` owns the canonical event list, writes the whole list back to
//! its `Storage` after every successful mutation, and then notifies
//! subscribers. Persistence is best effort: storage failures are logged and
//! never undo or block an in-memory change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::codec::{decode_events, encode_events};
use crate::constants::STORAGE_KEY;
use crate::error::StoreResult;
use crate::event::{CalendarEvent, EventPatch, NewEvent};
use crate::sample::sample_events;
use crate::storage::Storage;
use crate::subscribers::{Subscribers, Subscription};

/// The event list plus a counter bumped by every successful mutation.
struct EventList {
    version: u64,
    events: Vec<CalendarEvent>,
}

pub struct EventStore {
    list: Mutex<EventList>,
    storage: Arc<dyn Storage>,
    key: String,
    subscribers: Subscribers,
}

impl EventStore {
    /// Open the store over `storage` using the default key.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        Self::open_with_key(storage, STORAGE_KEY)
    }

    /// Load the list stored under `key`.
    ///
    /// With nothing stored yet, the store seeds itself with the sample events
    /// and persists them. Unreadable or malformed data also falls back to the
    /// sample events without persisting them: the bad entry stays in storage
    /// until the next successful mutation overwrites it.
    pub fn open_with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let events = match load(storage.as_ref(), &key) {
            Ok(Some(events)) => {
                debug!(key = %key, count = events.len(), "Loaded events from storage");
                events
            }
            Ok(None) => {
                let seed = sample_events();
                persist(storage.as_ref(), &key, &seed);
                seed
            }
            Err(e) => {
                error!(key = %key, error = %e, "Failed to load events from storage");
                sample_events()
            }
        };

        EventStore {
            list: Mutex::new(EventList { version: 0, events }),
            storage,
            key,
            subscribers: Subscribers::new(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Snapshot of all events in insertion order.
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.lock_list().events.clone()
    }

    /// Snapshot together with the version it reflects. Versions start at 0
    /// on open and grow by one per successful mutation, so of two snapshots
    /// the one with the higher version is the newer.
    pub fn events_versioned(&self) -> (u64, Vec<CalendarEvent>) {
        let list = self.lock_list();
        (list.version, list.events.clone())
    }

    pub fn version(&self) -> u64 {
        self.lock_list().version
    }

    pub fn get_event(&self, id: &str) -> Option<CalendarEvent> {
        self.lock_list().events.iter().find(|e| e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_list().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create an event with a freshly minted id and return it.
    pub fn add_event(&self, event: NewEvent) -> CalendarEvent {
        let created = {
            let mut list = self.lock_list();
            let created = CalendarEvent::from_new(mint_id(&list.events), event);
            list.events.push(created.clone());
            list.version += 1;
            persist(self.storage.as_ref(), &self.key, &list.events);
            created
        };

        self.subscribers.notify();
        created
    }

    /// Merge `patch` over the event with `id`. The existing id always wins.
    ///
    /// Returns false, without notifying, if no such event exists.
    pub fn update_event(&self, id: &str, patch: EventPatch) -> bool {
        self.mutate(|events| {
            let event = events.iter_mut().find(|e| e.id == id)?;
            patch.apply_to(event);
            Some(())
        })
        .is_some()
    }

    /// Remove the event with `id`. Returns false if there was none.
    pub fn delete_event(&self, id: &str) -> bool {
        self.mutate(|events| {
            let index = events.iter().position(|e| e.id == id)?;
            events.remove(index);
            Some(())
        })
        .is_some()
    }

    pub fn clear_all_events(&self) {
        self.mutate(|events| {
            events.clear();
            Some(())
        });
    }

    /// Replace everything with a fresh copy of the sample events.
    pub fn reset_to_sample_data(&self) {
        self.mutate(|events| {
            *events = sample_events();
            Some(())
        });
    }

    /// Register a listener called after every successful mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Run `change` under the list lock. `None` means nothing changed: no
    /// version bump, no write and no notification. Otherwise the version is
    /// bumped, the list persisted, the lock released, and subscribers
    /// notified. Listeners that race each other compare versions to keep the
    /// newest snapshot.
    fn mutate<R>(&self, change: impl FnOnce(&mut Vec<CalendarEvent>) -> Option<R>) -> Option<R> {
        let result = {
            let mut list = self.lock_list();
            let result = change(&mut list.events)?;
            list.version += 1;
            persist(self.storage.as_ref(), &self.key, &list.events);
            result
        };

        self.subscribers.notify();
        Some(result)
    }

    // Mutations never panic while holding the lock, so a poisoned list is
    // still consistent.
    fn lock_list(&self) -> MutexGuard<'_, EventList> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("key", &self.key)
            .field("events", &self.len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn load(storage: &dyn Storage, key: &str) -> StoreResult<Option<Vec<CalendarEvent>>> {
    match storage.get_item(key)? {
        Some(content) => Ok(Some(decode_events(&content)?)),
        None => Ok(None),
    }
}

fn persist(storage: &dyn Storage, key: &str, events: &[CalendarEvent]) {
    let result = encode_events(events).and_then(|content| storage.set_item(key, &content));

    if let Err(e) = result {
        warn!(key = %key, error = %e, "Failed to save events to storage");
    }
}

/// A v4 UUID, redrawn in the unlikely case it collides with a held id.
fn mint_id(events: &[CalendarEvent]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !events.iter().any(|e| e.id == id) {
            return id;
        }
    }
}
