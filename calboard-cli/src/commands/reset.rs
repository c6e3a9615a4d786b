use anyhow::Result;
use calboard_core::EventStore;
use owo_colors::OwoColorize;

pub fn run(store: &EventStore) -> Result<()> {
    store.reset_to_sample_data();

    println!(
        "{}",
        format!("Restored {} sample events", store.len()).green()
    );
    Ok(())
}
