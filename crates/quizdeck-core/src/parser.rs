//! Deck CSV parser.
//!
//! Decks are headerless CSV files with one term per row:
//! `term,definition,tag1,tag2,subsection`. The four-column variant (no
//! subsection) is accepted everywhere; the missing column defaults to empty.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::model::{Deck, Term};

/// Parse a deck CSV file.
pub fn parse_deck(path: &Path) -> Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file: {}", path.display()))?;

    parse_deck_str(&content, path)
}

/// Parse deck CSV content (useful for testing).
pub fn parse_deck_str(content: &str, source_path: &Path) -> Result<Deck> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut terms = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("malformed CSV row {} in {}", index + 1, source_path.display())
        })?;

        // Rows consisting only of empty cells are blank lines; skip them.
        if record.iter().all(str::is_empty) {
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        terms.push(Term {
            term: field(0),
            definition: field(1),
            tag1: field(2),
            tag2: field(3),
            subsection: field(4),
        });
    }

    Ok(Deck::new(terms))
}

/// A warning from deck validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// One-based row number in the source file, if applicable.
    pub row: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a deck for common data problems. None of these stop a quiz; the
/// pool filter already skips what it must.
pub fn validate_deck(deck: &Deck) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = std::collections::HashSet::new();
    for (index, term) in deck.terms.iter().enumerate() {
        let row = Some(index + 1);

        if term.is_corrupted() {
            warnings.push(ValidationWarning {
                row,
                message: format!(
                    "header row leaked into data (tags '{}'/'{}'); it will be skipped",
                    term.tag1, term.tag2
                ),
            });
            continue;
        }

        if term.term.is_empty() {
            warnings.push(ValidationWarning {
                row,
                message: "term is empty".into(),
            });
        }
        if term.definition.is_empty() {
            warnings.push(ValidationWarning {
                row,
                message: format!("definition is empty for '{}'", term.term),
            });
        }

        if !term.term.is_empty() && !seen.insert(&term.term) {
            warnings.push(ValidationWarning {
                row,
                message: format!("duplicate term: {}", term.term),
            });
        }
    }

    warnings
}
