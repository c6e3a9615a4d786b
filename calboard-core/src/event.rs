//! Calendar event types shared by every calboard view.
//!
//! `CalendarEvent` is the only entity the store holds. Views create events
//! from a `NewEvent` (the store mints the id) and edit them with an
//! `EventPatch`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_EVENT_COLOR;

/// A calendar event as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Store-assigned identifier, never changed after creation
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex display color; views fall back to `DEFAULT_EVENT_COLOR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
}

impl CalendarEvent {
    pub(crate) fn from_new(id: String, event: NewEvent) -> Self {
        CalendarEvent {
            id,
            title: event.title,
            start: event.start,
            end: event.end,
            description: event.description,
            color: event.color,
            all_day: event.all_day,
        }
    }

    /// An absent flag counts as a timed event.
    pub fn is_all_day(&self) -> bool {
        self.all_day.unwrap_or(false)
    }

    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Everything needed to create an event, minus the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub all_day: Option<bool>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        NewEvent {
            title: title.into(),
            start,
            end,
            description: None,
            color: None,
            all_day: None,
        }
    }

    /// An event ending one hour after `start`, the default for single-date pickers.
    pub fn lasting_one_hour(title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self::new(title, start, start + Duration::hours(1))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = Some(all_day);
        self
    }
}

/// A partial update merged over an existing event.
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the value. The `id` field is accepted so callers can pass a whole
/// event back in, but the store always keeps the existing id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub id: Option<String>,
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub description: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub all_day: Option<Option<bool>>,
}

impl EventPatch {
    pub fn title(title: impl Into<String>) -> Self {
        EventPatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Move or resize an event, as drag-and-drop views do.
    pub fn reschedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        EventPatch {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.all_day.is_none()
    }

    /// Merge this patch over `event`. The event's id is never touched.
    pub(crate) fn apply_to(self, event: &mut CalendarEvent) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
    }
}

impl From<CalendarEvent> for EventPatch {
    fn from(event: CalendarEvent) -> Self {
        EventPatch {
            id: Some(event.id),
            title: Some(event.title),
            start: Some(event.start),
            end: Some(event.end),
            description: Some(event.description),
            color: Some(event.color),
            all_day: Some(event.all_day),
        }
    }
}
