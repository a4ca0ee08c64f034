//! Deck validation report.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdeck_core::parser;

use crate::config;

pub fn execute(deck_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let cli_config = config::load_config_from(config_path.as_deref())?;
    let path = deck_path.unwrap_or(cli_config.deck);

    let deck = parser::parse_deck(&path)
        .with_context(|| format!("failed to load deck {}", path.display()))?;

    println!("Deck: {} ({} terms)", path.display(), deck.len());

    let warnings = parser::validate_deck(&deck);
    for warning in &warnings {
        match warning.row {
            Some(row) => println!("  [row {row}] WARNING: {}", warning.message),
            None => println!("  WARNING: {}", warning.message),
        }
    }

    if warnings.is_empty() {
        println!("Deck is valid.");
    } else {
        println!();
        println!("{} warning(s) found.", warnings.len());
    }

    Ok(())
}
