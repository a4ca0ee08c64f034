//! Per-session answer statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Term;

/// Bucket label for terms with no tag in the relevant position.
pub const OTHER_LABEL: &str = "Other";

/// Running tallies for one quiz pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Correctly answered questions.
    pub correct: u32,
    /// Incorrectly answered questions.
    pub wrong: u32,
    /// Wrong answers bucketed by category and subcategory label.
    pub wrong_by_category: BTreeMap<String, u32>,
    /// Questions asked so far, counting the one being answered.
    pub question_number: u32,
}

impl SessionStats {
    pub fn record_correct(&mut self) {
        self.question_number += 1;
        self.correct += 1;
    }

    pub fn record_wrong(&mut self, term: &Term) {
        self.question_number += 1;
        self.wrong += 1;
        for label in miss_labels(term) {
            *self.wrong_by_category.entry(label.to_string()).or_insert(0) += 1;
        }
    }

    /// Fraction of answered questions that were correct, 0.0 when none.
    pub fn accuracy(&self) -> f64 {
        let answered = self.correct + self.wrong;
        if answered == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(answered)
        }
    }
}

/// The labels a missed term is credited under: its category and subcategory,
/// each falling back to [`OTHER_LABEL`] when empty. When both resolve to the
/// same label it is credited once, not twice.
pub fn miss_labels(term: &Term) -> Vec<&str> {
    let cat = if term.tag1.is_empty() {
        OTHER_LABEL
    } else {
        term.tag1.as_str()
    };
    let sub = if term.tag2.is_empty() {
        OTHER_LABEL
    } else {
        term.tag2.as_str()
    };
    if cat == sub {
        vec![cat]
    } else {
        vec![cat, sub]
    }
}
