//! Core data model types for quizdeck.
//!
//! These are the fundamental types the entire quizdeck system uses to
//! represent study terms and parsed decks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Tag values that mark a corrupted row where a header line leaked into the
/// data. Rows carrying these are excluded from every pool and listing.
pub const SENTINEL_TAGS: [&str; 2] = ["tag1", "tag2"];

/// A single study record: a term, its definition, and its taxonomy tags.
///
/// `term` is the identity key; two rows with the same `term` describe the
/// same record as far as session bookkeeping is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The term being studied.
    pub term: String,
    /// The definition shown or asked for.
    pub definition: String,
    /// Category tag (may be empty).
    #[serde(default)]
    pub tag1: String,
    /// Subcategory tag (may be empty).
    #[serde(default)]
    pub tag2: String,
    /// Subsection label (may be empty; absent in the 4-column deck variant).
    #[serde(default)]
    pub subsection: String,
}

impl Term {
    /// Whether this row is a header-leak artifact and must be ignored.
    pub fn is_corrupted(&self) -> bool {
        SENTINEL_TAGS.contains(&self.tag1.as_str())
            || SENTINEL_TAGS.contains(&self.tag2.as_str())
    }
}

/// A parsed dataset: the ordered terms plus dataset-level taxonomy metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    /// All rows in file order, including any corrupted rows (filtering
    /// happens at pool-building time so validation can still see them).
    pub terms: Vec<Term>,
    /// Categories whose terms have no meaningful subcategory taxonomy.
    /// For these, option candidates match on category alone.
    #[serde(default)]
    pub flat_categories: BTreeSet<String>,
}

impl Deck {
    pub fn new(terms: Vec<Term>) -> Self {
        Self {
            terms,
            flat_categories: BTreeSet::new(),
        }
    }

    pub fn with_flat_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flat_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a category uses the flat (no-subcategory) taxonomy.
    pub fn is_flat(&self, category: &str) -> bool {
        self.flat_categories.contains(category)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `subcategory` appears only under `category` in this deck.
    ///
    /// Used by the cascading deselection rule: a subcategory survives its
    /// category's deselection if any other category also carries it.
    pub(crate) fn subcategory_exclusive_to(&self, subcategory: &str, category: &str) -> bool {
        let mut seen_under = false;
        for t in self.terms.iter().filter(|t| !t.is_corrupted()) {
            if t.tag2 == subcategory {
                if t.tag1 == category {
                    seen_under = true;
                } else {
                    return false;
                }
            }
        }
        seen_under
    }

    /// Whether `subsection` appears only under `category` in this deck.
    pub(crate) fn subsection_exclusive_to_category(
        &self,
        subsection: &str,
        category: &str,
    ) -> bool {
        let mut seen_under = false;
        for t in self.terms.iter().filter(|t| !t.is_corrupted()) {
            if t.subsection == subsection && !t.subsection.is_empty() {
                if t.tag1 == category {
                    seen_under = true;
                } else {
                    return false;
                }
            }
        }
        seen_under
    }

    /// Whether `subsection` appears only under `subcategory` in this deck.
    pub(crate) fn subsection_exclusive_to_subcategory(
        &self,
        subsection: &str,
        subcategory: &str,
    ) -> bool {
        let mut seen_under = false;
        for t in self.terms.iter().filter(|t| !t.is_corrupted()) {
            if t.subsection == subsection && !t.subsection.is_empty() {
                if t.tag2 == subcategory {
                    seen_under = true;
                } else {
                    return false;
                }
            }
        }
        seen_under
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(term: &str, tag1: &str, tag2: &str, subsection: &str) -> Term {
        Term {
            term: term.into(),
            definition: format!("def of {term}"),
            tag1: tag1.into(),
            tag2: tag2.into(),
            subsection: subsection.into(),
        }
    }

    #[test]
    fn sentinel_rows_are_corrupted() {
        assert!(term("x", "tag1", "", "").is_corrupted());
        assert!(term("x", "", "tag2", "").is_corrupted());
        assert!(!term("x", "Psychology", "Cognition", "").is_corrupted());
        assert!(!term("x", "", "", "").is_corrupted());
    }

    #[test]
    fn flat_category_lookup() {
        let deck = Deck::new(vec![]).with_flat_categories(["People", "Theories"]);
        assert!(deck.is_flat("People"));
        assert!(!deck.is_flat("Psychology"));
    }

    #[test]
    fn subcategory_exclusivity_respects_other_owners() {
        let deck = Deck::new(vec![
            term("a", "Psychology", "Memory", ""),
            term("b", "Sociology", "Memory", ""),
            term("c", "Psychology", "Cognition", ""),
        ]);
        // Memory is shared between Psychology and Sociology.
        assert!(!deck.subcategory_exclusive_to("Memory", "Psychology"));
        // Cognition belongs only to Psychology.
        assert!(deck.subcategory_exclusive_to("Cognition", "Psychology"));
        // Never-seen values are not exclusive to anything.
        assert!(!deck.subcategory_exclusive_to("Ghost", "Psychology"));
    }

    #[test]
    fn subsection_exclusivity() {
        let deck = Deck::new(vec![
            term("a", "Psychology", "Memory", "1A"),
            term("b", "Psychology", "Cognition", "1B"),
            term("c", "Sociology", "Groups", "1B"),
        ]);
        assert!(deck.subsection_exclusive_to_category("1A", "Psychology"));
        assert!(!deck.subsection_exclusive_to_category("1B", "Psychology"));
        assert!(deck.subsection_exclusive_to_subcategory("1A", "Memory"));
        assert!(!deck.subsection_exclusive_to_subcategory("1B", "Cognition"));
    }

    #[test]
    fn term_serde_roundtrip() {
        let t = term("Operant conditioning", "Psychology", "Learning", "6B");
        let json = serde_json::to_string(&t).unwrap();
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
