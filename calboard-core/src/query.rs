//! Read-only views over an event snapshot.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::event::CalendarEvent;

/// Events whose start falls on `date` as seen in `tz`.
pub fn events_on<'a, Tz: TimeZone>(
    events: &'a [CalendarEvent],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|e| e.start.with_timezone(tz).date_naive() == date)
        .collect()
}

/// Dates (in `tz`) that have at least one event starting on them, ascending.
pub fn days_with_events<Tz: TimeZone>(events: &[CalendarEvent], tz: &Tz) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = events
        .iter()
        .map(|e| e.start.with_timezone(tz).date_naive())
        .collect();
    days.sort();
    days.dedup();
    days
}

/// The `limit` latest-starting events, newest first.
pub fn most_recent(events: &[CalendarEvent], limit: usize) -> Vec<&CalendarEvent> {
    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));
    sorted.truncate(limit);
    sorted
}

/// Start-time window; `None` leaves that side open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        DateRange { from, to }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at <= to)
    }

    /// Events starting inside the range, ordered by start.
    pub fn filter<'a>(&self, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        let mut matching: Vec<&CalendarEvent> =
            events.iter().filter(|e| self.contains(e.start)).collect();
        matching.sort_by_key(|e| e.start);
        matching
    }
}
