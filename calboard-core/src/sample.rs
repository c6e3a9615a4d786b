//! Demonstration events used to seed an empty store.

use chrono::{DateTime, NaiveDate, Utc};

use crate::event::CalendarEvent;

/// Build a fresh copy of the demonstration dataset.
pub fn sample_events() -> Vec<CalendarEvent> {
    vec![
        sample(
            "1",
            "Team Meeting",
            at(2024, 6, 15, 10, 0),
            at(2024, 6, 15, 11, 0),
            "Weekly team sync meeting",
            "#3b82f6",
            None,
        ),
        sample(
            "2",
            "Project Deadline",
            at(2024, 6, 20, 9, 0),
            at(2024, 6, 20, 17, 0),
            "Final project submission",
            "#ef4444",
            Some(true),
        ),
        sample(
            "3",
            "Conference Call",
            at(2024, 6, 18, 14, 30),
            at(2024, 6, 18, 15, 30),
            "Client presentation",
            "#10b981",
            None,
        ),
        sample(
            "4",
            "Code Review",
            at(2024, 6, 22, 16, 0),
            at(2024, 6, 22, 17, 0),
            "Review pull requests",
            "#8b5cf6",
            None,
        ),
    ]
}

fn sample(
    id: &str,
    title: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    description: &str,
    color: &str,
    all_day: Option<bool>,
) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        start,
        end,
        description: Some(description.to_string()),
        color: Some(color.to_string()),
        all_day,
    }
}

// Inputs are fixed literals, so the fallback is never reached.
fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_sample_events_have_unique_ids() {
        let events = sample_events();
        let ids: HashSet<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(events.len(), 4);
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_sample_dates() {
        let events = sample_events();
        assert_eq!(
            events[2].start,
            Utc.with_ymd_and_hms(2024, 6, 18, 14, 30, 0).unwrap()
        );
        assert!(events[1].is_all_day());
        assert!(!events[0].is_all_day());
    }
}
