//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};

use quizdeck_core::model::Deck;
use quizdeck_core::parser;

use crate::config::CliConfig;

pub mod categories;
pub mod init;
pub mod quiz;
pub mod stats;
pub mod study;
pub mod validate;

/// Parse the deck named by `deck_override` (or the configured default) and
/// attach the configured flat-category metadata.
pub fn load_deck(config: &CliConfig, deck_override: Option<&Path>) -> Result<Deck> {
    let path = deck_override.unwrap_or(&config.deck);
    let deck = parser::parse_deck(path)
        .with_context(|| format!("failed to load deck {}", path.display()))?;
    Ok(deck.with_flat_categories(config.flat_categories.iter().cloned()))
}
