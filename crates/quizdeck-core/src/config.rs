//! Quiz session configuration: tag selections and answer mode.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Deck;

/// The filter and mode settings for a quiz session.
///
/// All toggles keep the configuration normalized: enabling
/// `use_all_categories` clears manual category selections, and deselecting a
/// tag cascades to dependent selections that belong exclusively to it in the
/// deck at hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Manually selected categories. Ignored while `use_all_categories` is on.
    #[serde(default)]
    pub selected_categories: BTreeSet<String>,
    /// Selected subcategories.
    #[serde(default)]
    pub selected_subcategories: BTreeSet<String>,
    /// Selected subsections.
    #[serde(default)]
    pub selected_subsections: BTreeSet<String>,
    /// Include every category regardless of manual selection.
    #[serde(default)]
    pub use_all_categories: bool,
    /// Ask definition -> term instead of term -> definition.
    #[serde(default)]
    pub inverse_mode: bool,
}

impl QuizConfig {
    /// Add or remove a category. No-op while `use_all_categories` is on.
    ///
    /// Deselecting removes any selected subcategories and subsections that
    /// exist only under this category in `deck`.
    pub fn toggle_category(&mut self, deck: &Deck, category: &str) {
        if self.use_all_categories {
            return;
        }
        if self.selected_categories.remove(category) {
            self.selected_subcategories
                .retain(|sub| !deck.subcategory_exclusive_to(sub, category));
            self.selected_subsections
                .retain(|sec| !deck.subsection_exclusive_to_category(sec, category));
        } else {
            self.selected_categories.insert(category.to_string());
        }
    }

    /// Add or remove a subcategory, cascading to exclusively-owned subsections.
    pub fn toggle_subcategory(&mut self, deck: &Deck, subcategory: &str) {
        if self.selected_subcategories.remove(subcategory) {
            self.selected_subsections
                .retain(|sec| !deck.subsection_exclusive_to_subcategory(sec, subcategory));
        } else {
            self.selected_subcategories.insert(subcategory.to_string());
        }
    }

    /// Add or remove a subsection.
    pub fn toggle_subsection(&mut self, subsection: &str) {
        if !self.selected_subsections.remove(subsection) {
            self.selected_subsections.insert(subsection.to_string());
        }
    }

    /// Switch the include-everything mode. Enabling it clears the manual
    /// category selection so the two can never disagree.
    pub fn set_all_categories(&mut self, enabled: bool) {
        self.use_all_categories = enabled;
        if enabled {
            self.selected_categories.clear();
        }
    }

    pub fn set_inverse_mode(&mut self, enabled: bool) {
        self.inverse_mode = enabled;
    }
}
