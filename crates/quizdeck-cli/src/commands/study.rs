//! Flashcard browser over the filtered deck.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{ensure, Result};

use quizdeck_core::config::QuizConfig;
use quizdeck_core::model::{Deck, Term};
use quizdeck_core::traits::StatsSink;
use quizdeck_core::{filter, statistics};
use quizdeck_store::FileStatsStore;

use crate::config;

pub fn execute(
    deck_path: Option<PathBuf>,
    category: Option<String>,
    subcategory: Option<String>,
    subsection: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cli_config = config::load_config_from(config_path.as_deref())?;
    let deck = super::load_deck(&cli_config, deck_path.as_deref())?;

    let pool = filtered_pool(&deck, category, subcategory, subsection);
    ensure!(!pool.is_empty(), "no terms match the current configuration");

    let store = FileStatsStore::open(&cli_config.stats_file)?;

    println!(
        "{} terms. [n] next  [p] previous  [f] flip  [w] mark wrong  [q] quit",
        pool.len()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut index = 0usize;
    let mut flipped = false;
    show_card(&pool, index, flipped);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "n" => {
                index = (index + 1) % pool.len();
                flipped = false;
                show_card(&pool, index, flipped);
            }
            "p" => {
                index = (index + pool.len() - 1) % pool.len();
                flipped = false;
                show_card(&pool, index, flipped);
            }
            "f" => {
                flipped = !flipped;
                show_card(&pool, index, flipped);
            }
            "w" => {
                let term = &pool[index];
                store.record_miss(&statistics::miss_labels(term));
                println!("Marked wrong: {}", term.term);
            }
            "q" => break,
            _ => {}
        }
    }

    Ok(())
}

fn filtered_pool(
    deck: &Deck,
    category: Option<String>,
    subcategory: Option<String>,
    subsection: Option<String>,
) -> Vec<Term> {
    let mut quiz_config = QuizConfig::default();
    match category {
        Some(category) => quiz_config.toggle_category(deck, &category),
        None => quiz_config.set_all_categories(true),
    }
    if let Some(subcategory) = subcategory {
        quiz_config.toggle_subcategory(deck, &subcategory);
    }
    if let Some(subsection) = subsection {
        quiz_config.toggle_subsection(&subsection);
    }

    filter::active_pool(deck, &quiz_config)
        .into_iter()
        .cloned()
        .collect()
}

fn show_card(pool: &[Term], index: usize, flipped: bool) {
    let term = &pool[index];
    println!();
    if flipped {
        println!("[{}/{}] {}", index + 1, pool.len(), term.definition);
    } else {
        println!("[{}/{}] {}", index + 1, pool.len(), term.term);
    }

    let labels: Vec<&str> = [&term.tag1, &term.tag2, &term.subsection]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect();
    if !labels.is_empty() {
        println!("    {}", labels.join(" / "));
    }
}
