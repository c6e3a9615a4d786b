use anyhow::{Result, bail};
use calboard_core::EventStore;
use owo_colors::OwoColorize;

pub fn run(store: &EventStore, id: &str) -> Result<()> {
    let Some(event) = store.get_event(id) else {
        bail!("Event '{}' not found", id);
    };

    if !store.delete_event(id) {
        bail!("Event '{}' not found", id);
    }

    println!("{}", format!("Deleted: {}", event.title).red());
    Ok(())
}
