//! Pool filtering: which deck terms a configuration makes active.

use std::collections::BTreeSet;

use crate::config::QuizConfig;
use crate::model::{Deck, Term};

/// All non-corrupted terms matching `config`, in deck order.
pub fn active_pool<'a>(deck: &'a Deck, config: &QuizConfig) -> Vec<&'a Term> {
    deck.terms
        .iter()
        .filter(|t| matches_config(t, config))
        .collect()
}

fn matches_config(term: &Term, config: &QuizConfig) -> bool {
    if term.is_corrupted() {
        return false;
    }

    if !config.use_all_categories
        && !config.selected_categories.is_empty()
        && !config.selected_categories.contains(&term.tag1)
    {
        return false;
    }

    if !config.selected_subcategories.is_empty() {
        if term.tag2.is_empty() {
            // Untagged terms ride along with a subcategory selection, but a
            // subsection selection pins the pool to fully-tagged terms.
            if !config.selected_subsections.is_empty() {
                return false;
            }
        } else if !config.selected_subcategories.contains(&term.tag2) {
            return false;
        }
    }

    if !config.selected_subsections.is_empty() {
        if term.subsection.is_empty() {
            return false;
        }
        if !config.selected_subsections.contains(&term.subsection) {
            return false;
        }
    }

    true
}

/// Distinct categories present in the deck, sorted.
pub fn categories(deck: &Deck) -> Vec<String> {
    let set: BTreeSet<&str> = deck
        .terms
        .iter()
        .filter(|t| !t.is_corrupted() && !t.tag1.is_empty())
        .map(|t| t.tag1.as_str())
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Distinct subcategories available under the current category selection,
/// sorted. With no categories selected (or all-categories on), every
/// subcategory in the deck is available.
pub fn subcategories(deck: &Deck, config: &QuizConfig) -> Vec<String> {
    let unrestricted = config.use_all_categories || config.selected_categories.is_empty();
    let set: BTreeSet<&str> = deck
        .terms
        .iter()
        .filter(|t| !t.is_corrupted() && !t.tag2.is_empty())
        .filter(|t| unrestricted || config.selected_categories.contains(&t.tag1))
        .map(|t| t.tag2.as_str())
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Distinct subsections available under the current category and subcategory
/// selections, sorted.
pub fn subsections(deck: &Deck, config: &QuizConfig) -> Vec<String> {
    let cat_unrestricted = config.use_all_categories || config.selected_categories.is_empty();
    let sub_unrestricted = config.selected_subcategories.is_empty();
    let set: BTreeSet<&str> = deck
        .terms
        .iter()
        .filter(|t| !t.is_corrupted() && !t.subsection.is_empty())
        .filter(|t| cat_unrestricted || config.selected_categories.contains(&t.tag1))
        .filter(|t| sub_unrestricted || config.selected_subcategories.contains(&t.tag2))
        .map(|t| t.subsection.as_str())
        .collect();
    set.into_iter().map(String::from).collect()
}
