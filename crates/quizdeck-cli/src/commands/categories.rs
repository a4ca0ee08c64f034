//! Category overview table.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use crate::config;

pub fn execute(deck_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let cli_config = config::load_config_from(config_path.as_deref())?;
    let deck = super::load_deck(&cli_config, deck_path.as_deref())?;

    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for term in deck.terms.iter().filter(|t| !t.is_corrupted()) {
        *counts
            .entry((term.tag1.clone(), term.tag2.clone()))
            .or_insert(0) += 1;
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Subcategory", "Terms"]);
    for ((tag1, tag2), count) in &counts {
        table.add_row(vec![
            label(tag1).to_string(),
            label(tag2).to_string(),
            count.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn label(tag: &str) -> &str {
    if tag.is_empty() {
        "(none)"
    } else {
        tag
    }
}
