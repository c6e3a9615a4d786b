//! Durable key/value storage behind the event store.
//!
//! The store only needs "read the string under this key" and "replace the
//! string under this key". Backends are injected so the store can run
//! against an in-memory fake in tests.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StoreResult;

/// A string-valued key/value store.
pub trait Storage: Send + Sync {
    /// Returns `None` if nothing has been stored under `key`.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}
