use anyhow::{Result, bail};
use calboard_core::{EventStore, NewEvent};
use chrono::Duration;
use owo_colors::OwoColorize;

use crate::time::parse_when;

pub fn run(
    store: &EventStore,
    title: String,
    start: String,
    end: Option<String>,
    description: Option<String>,
    color: Option<String>,
    all_day: bool,
) -> Result<()> {
    let event = build_event(title, &start, end.as_deref(), description, color, all_day)?;
    let created = store.add_event(event);

    println!("{}", format!("Created: {} [{}]", created.title, created.id).green());
    Ok(())
}

/// Build the event to create. Without an end, timed events last an hour and
/// all-day events a day.
fn build_event(
    title: String,
    start: &str,
    end: Option<&str>,
    description: Option<String>,
    color: Option<String>,
    all_day: bool,
) -> Result<NewEvent> {
    if title.trim().is_empty() {
        bail!("Event title cannot be empty");
    }

    let start = parse_when(start)?;
    let all_day = all_day || (start.date_only && end.is_none());

    let end_at = match end {
        Some(end) => parse_when(end)?.at,
        None if all_day => start.at + Duration::days(1),
        None => start.at + Duration::hours(1),
    };

    let mut event = NewEvent::new(title, start.at, end_at);
    event.description = description;
    event.color = color;
    if all_day {
        event.all_day = Some(true);
    }

    Ok(event)
}
