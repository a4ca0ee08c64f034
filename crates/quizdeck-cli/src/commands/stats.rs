//! Persisted missed-answer statistics.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use quizdeck_store::FileStatsStore;

use crate::config;

pub fn execute(
    stats_file: Option<PathBuf>,
    reset: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cli_config = config::load_config_from(config_path.as_deref())?;
    let path = stats_file.unwrap_or(cli_config.stats_file);

    if reset {
        let store = FileStatsStore::open(&path)?;
        store.reset()?;
        println!("Statistics reset.");
        return Ok(());
    }

    if !path.exists() {
        println!("No statistics recorded yet ({}).", path.display());
        return Ok(());
    }

    let store = FileStatsStore::open(&path)?;
    let snapshot = store.snapshot();
    if snapshot.is_empty() {
        println!("No statistics recorded yet ({}).", path.display());
        return Ok(());
    }

    println!("Total missed answers: {}", snapshot.total);
    if let Some(updated_at) = snapshot.updated_at {
        println!("Last updated: {}", updated_at.format("%Y-%m-%d %H:%M UTC"));
    }

    let mut table = Table::new();
    table.set_header(vec!["Label", "Missed"]);
    for (label, count) in snapshot.worst_categories() {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    println!("{table}");

    Ok(())
}
