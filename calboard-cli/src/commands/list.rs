use anyhow::Result;
use calboard_core::query::{self, DateRange};
use calboard_core::{CalendarEvent, EventStore};
use chrono::Local;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};
use crate::time::{parse_day, parse_when};

pub fn run(
    store: &EventStore,
    date: Option<String>,
    recent: Option<usize>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let events = store.events();
    let selected = select(&events, date, recent, from, to)?;

    if selected.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &selected {
        println!("{}", event.render());
    }

    println!();
    println!(
        "{}",
        format!("{} {}", selected.len(), pluralize("event", selected.len())).dimmed()
    );

    Ok(())
}

/// Pick events by day, then by recency, then by range; everything otherwise.
fn select(
    events: &[CalendarEvent],
    date: Option<String>,
    recent: Option<usize>,
    from: Option<String>,
    to: Option<String>,
) -> Result<Vec<&CalendarEvent>> {
    let selected = if let Some(day) = date {
        query::events_on(events, parse_day(&day)?, &Local)
    } else if let Some(limit) = recent {
        query::most_recent(events, limit)
    } else if from.is_some() || to.is_some() {
        let range = DateRange::new(
            from.as_deref().map(parse_when).transpose()?.map(|w| w.at),
            to.as_deref().map(parse_when).transpose()?.map(|w| w.at),
        );
        range.filter(events)
    } else {
        events.iter().collect()
    };

    Ok(selected)
}
