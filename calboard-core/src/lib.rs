//! Core types for calboard.
//!
//! This crate provides the event store shared by every calendar view:
//! - `EventStore`: the canonical event list, persisted and observable
//! - `StoreBinding`: a per-view mirror of the store with pass-through edits
//! - `storage`: pluggable persistence backends

pub mod binding;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod query;
pub mod sample;
pub mod storage;
pub mod store;
pub mod subscribers;

pub use binding::StoreBinding;
pub use error::{StoreError, StoreResult};
pub use event::{CalendarEvent, EventPatch, NewEvent};
pub use store::EventStore;
pub use subscribers::Subscription;
