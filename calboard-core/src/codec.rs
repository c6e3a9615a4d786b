//! JSON form of the persisted event list.
//!
//! The list is written as a single JSON array. Dates are RFC 3339 strings,
//! which parse back to the same instant.

use crate::error::StoreResult;
use crate::event::CalendarEvent;

pub fn encode_events(events: &[CalendarEvent]) -> StoreResult<String> {
    Ok(serde_json::to_string(events)?)
}

pub fn decode_events(content: &str) -> StoreResult<Vec<CalendarEvent>> {
    Ok(serde_json::from_str(content)?)
}
