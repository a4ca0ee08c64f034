//! Multiple-choice option generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Deck, Term};

/// Upper bound on wrong options per question. Fewer is allowed when the pool
/// cannot supply three distinct candidates.
pub const MAX_DISTRACTORS: usize = 3;

/// The value a player must pick to be correct, given the answer direction.
pub fn answer_value(term: &Term, inverse_mode: bool) -> &str {
    if inverse_mode {
        &term.definition
    } else {
        &term.term
    }
}

/// The value shown as the question prompt, given the answer direction.
pub fn prompt_value(term: &Term, inverse_mode: bool) -> &str {
    if inverse_mode {
        &term.term
    } else {
        &term.definition
    }
}

/// Pick up to [`MAX_DISTRACTORS`] wrong-answer values for `target` from `pool`.
///
/// Candidates matching the strict rule are preferred: terms in a flat
/// category share `tag1`; everything else shares both `tag1` and `tag2`.
/// When the strict rule yields fewer than three, the rule relaxes (flat: any
/// other pool term; otherwise: share `tag1` only).
pub fn pick_distractors<R: Rng>(
    deck: &Deck,
    pool: &[&Term],
    target: &Term,
    inverse_mode: bool,
    rng: &mut R,
) -> Vec<String> {
    let flat = deck.is_flat(&target.tag1);

    let strict = |t: &&&Term| {
        if flat {
            t.tag1 == target.tag1
        } else {
            t.tag1 == target.tag1 && t.tag2 == target.tag2
        }
    };

    let others: Vec<&&Term> = pool.iter().filter(|t| t.term != target.term).collect();
    let mut candidates: Vec<&&Term> = others.iter().filter(strict).copied().collect();
    if candidates.len() < MAX_DISTRACTORS {
        candidates = if flat {
            others.clone()
        } else {
            others
                .iter()
                .filter(|t| t.tag1 == target.tag1)
                .copied()
                .collect()
        };
    }

    candidates.shuffle(rng);
    candidates
        .into_iter()
        .take(MAX_DISTRACTORS)
        .map(|t| answer_value(t, inverse_mode).to_string())
        .collect()
}

/// Assemble the final option list: correct value plus distractors, shuffled.
pub fn build_options<R: Rng>(
    target: &Term,
    distractors: Vec<String>,
    inverse_mode: bool,
    rng: &mut R,
) -> Vec<String> {
    let mut options = distractors;
    options.push(answer_value(target, inverse_mode).to_string());
    options.shuffle(rng);
    options
}
