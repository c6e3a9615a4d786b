use anyhow::Result;
use calboard_core::EventStore;
use owo_colors::OwoColorize;

use crate::render::pluralize;

pub fn run(store: &EventStore) -> Result<()> {
    let removed = store.len();
    store.clear_all_events();

    println!(
        "{}",
        format!("Removed {} {}", removed, pluralize("event", removed)).red()
    );
    Ok(())
}
