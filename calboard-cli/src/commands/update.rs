use anyhow::{Result, bail};
use calboard_core::{EventPatch, EventStore};
use owo_colors::OwoColorize;

use crate::time::parse_when;

/// Field values as given on the command line.
#[derive(Debug, Default)]
pub struct Fields {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub all_day: Option<bool>,
}

impl Fields {
    /// An empty description or color clears it.
    fn into_patch(self) -> Result<EventPatch> {
        Ok(EventPatch {
            id: None,
            title: self.title,
            start: self.start.as_deref().map(parse_when).transpose()?.map(|w| w.at),
            end: self.end.as_deref().map(parse_when).transpose()?.map(|w| w.at),
            description: self.description.map(non_empty),
            color: self.color.map(non_empty),
            all_day: self.all_day.map(Some),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub fn run(store: &EventStore, id: &str, fields: Fields) -> Result<()> {
    let patch = fields.into_patch()?;

    if patch.is_empty() {
        bail!("Nothing to update. Pass at least one of --title, --start, --end, --description, --color, --all-day");
    }

    if !store.update_event(id, patch) {
        bail!("Event '{}' not found", id);
    }

    if let Some(event) = store.get_event(id) {
        println!("{}", format!("Updated: {}", event.title).yellow());
    }
    Ok(())
}
