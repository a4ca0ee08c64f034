//! The quiz session state machine.
//!
//! Owns the deck, the configuration, and all per-pass bookkeeping: which
//! terms have been shown, which were missed, the current question and its
//! options, and the running stats. Wrong answers are mirrored to a
//! [`StatsSink`] so aggregates can outlive the session.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::distractor;
use crate::error::QuizError;
use crate::filter;
use crate::model::{Deck, Term};
use crate::statistics::{self, SessionStats};
use crate::traits::{NoopSink, StatsSink};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Selections may change; no question is active.
    Configuring,
    /// A pass is running.
    InProgress,
    /// The operating pool is exhausted (or the retake set emptied).
    Complete,
}

/// Outcome of scoring one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answered {
    pub correct: bool,
    /// The value that would have been correct, for feedback display.
    pub correct_answer: String,
}

/// The active question as presented to a player.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<String>,
    pub tag1: String,
    pub tag2: String,
    pub subsection: String,
}

/// Read-only view of the whole session for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub question: Option<QuestionView>,
    pub stats: SessionStats,
    pub retake_mode: bool,
    pub inverse_mode: bool,
    /// Terms still to be asked in the current operating pool.
    pub remaining: usize,
    pub wrong_count: usize,
    pub session_id: Uuid,
}

/// One quiz session over one deck.
pub struct QuizEngine {
    deck: Deck,
    config: QuizConfig,
    phase: Phase,
    retake_mode: bool,
    shown: BTreeSet<String>,
    wrong: BTreeSet<String>,
    current: Option<Term>,
    options: Vec<String>,
    stats: SessionStats,
    session_id: Uuid,
    sink: Arc<dyn StatsSink>,
    rng: StdRng,
}

impl QuizEngine {
    pub fn new(deck: Deck, config: QuizConfig) -> Self {
        Self::with_sink(deck, config, Arc::new(NoopSink))
    }

    pub fn with_sink(deck: Deck, config: QuizConfig, sink: Arc<dyn StatsSink>) -> Self {
        Self {
            deck,
            config,
            phase: Phase::Configuring,
            retake_mode: false,
            shown: BTreeSet::new(),
            wrong: BTreeSet::new(),
            current: None,
            options: Vec::new(),
            stats: SessionStats::default(),
            session_id: Uuid::new_v4(),
            sink,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the RNG with a seeded one for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // --- configuration ---

    pub fn toggle_category(&mut self, category: &str) {
        self.config.toggle_category(&self.deck, category);
    }

    pub fn toggle_subcategory(&mut self, subcategory: &str) {
        self.config.toggle_subcategory(&self.deck, subcategory);
    }

    pub fn toggle_subsection(&mut self, subsection: &str) {
        self.config.toggle_subsection(subsection);
    }

    pub fn set_all_categories(&mut self, enabled: bool) {
        self.config.set_all_categories(enabled);
    }

    pub fn set_inverse_mode(&mut self, enabled: bool) {
        self.config.set_inverse_mode(enabled);
    }

    /// Categories present in the deck, sorted.
    pub fn categories(&self) -> Vec<String> {
        filter::categories(&self.deck)
    }

    /// Subcategories available under the current selection, sorted.
    pub fn subcategories(&self) -> Vec<String> {
        filter::subcategories(&self.deck, &self.config)
    }

    /// Subsections available under the current selection, sorted.
    pub fn subsections(&self) -> Vec<String> {
        filter::subsections(&self.deck, &self.config)
    }

    pub fn active_pool(&self) -> Vec<&Term> {
        filter::active_pool(&self.deck, &self.config)
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    // --- lifecycle ---

    /// Begin a fresh pass over the full operating pool.
    ///
    /// Fails with [`QuizError::EmptyPool`] (and changes nothing) when the
    /// configuration matches no terms. Resets stats and shown bookkeeping;
    /// missed-term history from earlier passes is kept.
    pub fn start(&mut self) -> Result<(), QuizError> {
        if filter::active_pool(&self.deck, &self.config).is_empty() {
            return Err(QuizError::EmptyPool);
        }
        self.retake_mode = false;
        self.shown.clear();
        self.stats = SessionStats::default();
        self.session_id = Uuid::new_v4();
        self.phase = Phase::InProgress;
        tracing::debug!(session = %self.session_id, "session started");
        self.draw();
        Ok(())
    }

    /// Begin a pass restricted to previously missed terms.
    pub fn start_retake(&mut self) -> Result<(), QuizError> {
        if self.wrong.is_empty() {
            return Err(QuizError::NothingToRetake);
        }
        let pool = filter::active_pool(&self.deck, &self.config);
        if !pool.iter().any(|t| self.wrong.contains(&t.term)) {
            return Err(QuizError::EmptyPool);
        }
        self.retake_mode = true;
        self.shown.clear();
        self.stats = SessionStats::default();
        self.session_id = Uuid::new_v4();
        self.phase = Phase::InProgress;
        tracing::debug!(
            session = %self.session_id,
            missed = self.wrong.len(),
            "retake started"
        );
        self.draw();
        Ok(())
    }

    /// Run the same configuration again from the top, keeping missed-term
    /// history so a later retake still covers earlier passes.
    pub fn retake_same(&mut self) -> Result<(), QuizError> {
        self.start()
    }

    /// Return to configuration. Selections and missed-term history survive;
    /// the in-flight pass (stats, shown terms, current question) does not.
    pub fn reconfigure(&mut self) {
        self.phase = Phase::Configuring;
        self.retake_mode = false;
        self.shown.clear();
        self.stats = SessionStats::default();
        self.current = None;
        self.options.clear();
    }

    // --- question loop ---

    /// Score `choice` against the active question.
    ///
    /// Always consumes the question; call [`next_question`](Self::next_question)
    /// to continue. May transition to [`Phase::Complete`] when this was the
    /// last term of the operating pool (or the last missed term in a retake).
    pub fn answer(&mut self, choice: &str) -> Result<Answered, QuizError> {
        let term = self.current.take().ok_or(QuizError::NoActiveQuestion)?;
        self.options.clear();

        let correct_answer =
            distractor::answer_value(&term, self.config.inverse_mode).to_string();
        let correct = choice == correct_answer;

        if correct {
            self.stats.record_correct();
            if self.retake_mode {
                self.wrong.remove(&term.term);
            }
        } else {
            self.stats.record_wrong(&term);
            self.wrong.insert(term.term.clone());
            self.sink.record_miss(&statistics::miss_labels(&term));
        }

        if self.retake_mode {
            if self.wrong.is_empty() {
                self.finish();
            }
        } else if self.shown.len() >= self.quiz_pool_len() {
            self.finish();
        }

        Ok(Answered {
            correct,
            correct_answer,
        })
    }

    /// Draw the next question, or confirm completion.
    ///
    /// Returns the new current term, or `None` when the session is (or has
    /// just become) complete. Calling this while complete changes nothing.
    pub fn next_question(&mut self) -> Option<&Term> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.draw();
        self.current.as_ref()
    }

    fn draw(&mut self) {
        let pool = filter::active_pool(&self.deck, &self.config);
        let quiz_pool: Vec<&Term> = if self.retake_mode {
            pool.into_iter()
                .filter(|t| self.wrong.contains(&t.term))
                .collect()
        } else {
            pool
        };
        let available: Vec<&Term> = if self.retake_mode {
            quiz_pool.clone()
        } else {
            quiz_pool
                .iter()
                .filter(|t| !self.shown.contains(&t.term))
                .copied()
                .collect()
        };

        let Some(&target) = available.choose(&mut self.rng) else {
            self.finish();
            return;
        };

        let inverse = self.config.inverse_mode;
        let distractors =
            distractor::pick_distractors(&self.deck, &quiz_pool, target, inverse, &mut self.rng);
        let options = distractor::build_options(target, distractors, inverse, &mut self.rng);
        let question = target.clone();

        if !self.retake_mode {
            self.shown.insert(question.term.clone());
        }
        self.options = options;
        self.current = Some(question);
    }

    fn finish(&mut self) {
        if self.phase != Phase::Complete {
            tracing::debug!(
                session = %self.session_id,
                correct = self.stats.correct,
                wrong = self.stats.wrong,
                "session complete"
            );
        }
        self.phase = Phase::Complete;
        self.current = None;
        self.options.clear();
    }

    fn quiz_pool_len(&self) -> usize {
        let pool = filter::active_pool(&self.deck, &self.config);
        if self.retake_mode {
            pool.iter().filter(|t| self.wrong.contains(&t.term)).count()
        } else {
            pool.len()
        }
    }

    // --- views ---

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn current(&self) -> Option<&Term> {
        self.current.as_ref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong.len()
    }

    pub fn retake_mode(&self) -> bool {
        self.retake_mode
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Terms still to be asked in the current operating pool.
    pub fn remaining(&self) -> usize {
        let pool = filter::active_pool(&self.deck, &self.config);
        if self.retake_mode {
            pool.iter().filter(|t| self.wrong.contains(&t.term)).count()
        } else {
            pool.iter().filter(|t| !self.shown.contains(&t.term)).count()
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            question: self.current.as_ref().map(|t| QuestionView {
                prompt: distractor::prompt_value(t, self.config.inverse_mode).to_string(),
                options: self.options.clone(),
                tag1: t.tag1.clone(),
                tag2: t.tag2.clone(),
                subsection: t.subsection.clone(),
            }),
            stats: self.stats.clone(),
            retake_mode: self.retake_mode,
            inverse_mode: self.config.inverse_mode,
            remaining: self.remaining(),
            wrong_count: self.wrong.len(),
            session_id: self.session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

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

    fn deck() -> Deck {
        Deck::new(vec![
            term("a", "Psychology", "Memory", "1A"),
            term("b", "Psychology", "Memory", "1A"),
            term("c", "Psychology", "Cognition", "1B"),
            term("d", "Sociology", "Groups", "2A"),
            term("e", "Sociology", "Groups", "2A"),
            term("f", "", "", ""),
        ])
    }

    fn engine() -> QuizEngine {
        QuizEngine::new(deck(), QuizConfig::default()).with_seed(42)
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl StatsSink for RecordingSink {
        fn record_miss(&self, labels: &[&str]) {
            self.calls
                .lock()
                .unwrap()
                .push(labels.iter().map(|s| s.to_string()).collect());
        }
    }

    /// Answer every question until completion; `correctly` decides per term.
    fn run_pass(engine: &mut QuizEngine, mut correctly: impl FnMut(&Term) -> bool) -> Vec<String> {
        let mut asked = Vec::new();
        let mut guard = 0;
        while let Some(t) = engine.current().cloned() {
            asked.push(t.term.clone());
            let choice = if correctly(&t) {
                distractor::answer_value(&t, engine.config().inverse_mode).to_string()
            } else {
                "definitely not an option".to_string()
            };
            engine.answer(&choice).unwrap();
            engine.next_question();
            guard += 1;
            assert!(guard < 1000, "session did not terminate");
        }
        asked
    }

    #[test]
    fn full_pass_asks_each_term_exactly_once() {
        let mut e = engine();
        e.start().unwrap();
        let mut asked = run_pass(&mut e, |_| true);
        assert!(e.is_complete());
        asked.sort();
        assert_eq!(asked, ["a", "b", "c", "d", "e", "f"]);
        assert_eq!(e.stats().correct, 6);
        assert_eq!(e.stats().question_number, 6);
    }

    #[test]
    fn start_on_empty_pool_fails_without_state_change() {
        let mut e = engine();
        e.toggle_category("Chemistry");
        assert_eq!(e.start(), Err(QuizError::EmptyPool));
        assert_eq!(e.phase(), Phase::Configuring);
        assert!(e.current().is_none());
        assert!(e.config().selected_categories.contains("Chemistry"));
    }

    #[test]
    fn answer_without_question_is_refused() {
        let mut e = engine();
        assert_eq!(
            e.answer("anything"),
            Err(QuizError::NoActiveQuestion)
        );
        e.start().unwrap();
        let t = e.current().unwrap().clone();
        e.answer(&t.term).unwrap();
        // The question was consumed; a second answer has nothing to score.
        assert_eq!(e.answer(&t.term), Err(QuizError::NoActiveQuestion));
    }

    #[test]
    fn options_always_include_the_correct_answer() {
        let mut e = engine();
        e.start().unwrap();
        while let Some(t) = e.current().cloned() {
            let options = e.options().to_vec();
            assert!(!options.is_empty() && options.len() <= 4);
            assert!(options.contains(&t.term));
            e.answer(&t.term).unwrap();
            e.next_question();
        }
    }

    #[test]
    fn wrong_answers_feed_stats_and_sink() {
        let sink = Arc::new(RecordingSink::default());
        let mut e = QuizEngine::with_sink(deck(), QuizConfig::default(), sink.clone())
            .with_seed(3);
        e.start().unwrap();
        run_pass(&mut e, |t| t.term != "a" && t.term != "f");
        assert_eq!(e.stats().wrong, 2);
        assert_eq!(e.stats().correct, 4);
        assert_eq!(e.stats().wrong_by_category["Psychology"], 1);
        assert_eq!(e.stats().wrong_by_category["Memory"], 1);
        // Fully untagged "f" lands in Other exactly once.
        assert_eq!(e.stats().wrong_by_category["Other"], 1);

        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&vec!["Psychology".to_string(), "Memory".to_string()]));
        assert!(calls.contains(&vec!["Other".to_string()]));
    }

    #[test]
    fn retake_covers_only_missed_terms_and_completes_when_cleared() {
        let mut e = engine();
        e.start().unwrap();
        run_pass(&mut e, |t| t.term != "b" && t.term != "d");
        assert!(e.is_complete());
        assert_eq!(e.wrong_count(), 2);

        e.start_retake().unwrap();
        assert!(e.retake_mode());
        let asked = run_pass(&mut e, |_| true);
        assert!(e.is_complete());
        assert_eq!(e.wrong_count(), 0);
        let mut unique: Vec<&str> = asked.iter().map(String::as_str).collect();
        unique.sort();
        unique.dedup();
        assert_eq!(unique, ["b", "d"]);
    }

    #[test]
    fn retake_repeats_terms_answered_wrong_again() {
        let mut e = engine();
        e.start().unwrap();
        run_pass(&mut e, |t| t.term != "b");
        e.start_retake().unwrap();

        // Miss "b" once more, then get it right; the retake only ends when
        // the missed set is empty.
        let mut misses_left = 1;
        let asked = run_pass(&mut e, |_| {
            if misses_left > 0 {
                misses_left -= 1;
                false
            } else {
                true
            }
        });
        assert!(e.is_complete());
        assert!(asked.len() >= 2);
        assert!(asked.iter().all(|t| t == "b"));
    }

    #[test]
    fn retake_without_misses_is_refused() {
        let mut e = engine();
        e.start().unwrap();
        run_pass(&mut e, |_| true);
        assert_eq!(e.start_retake(), Err(QuizError::NothingToRetake));
        assert!(e.is_complete());
    }

    #[test]
    fn retake_same_keeps_missed_history_and_resets_stats() {
        let mut e = engine();
        e.start().unwrap();
        run_pass(&mut e, |t| t.term != "c");
        assert_eq!(e.wrong_count(), 1);

        e.retake_same().unwrap();
        assert!(!e.retake_mode());
        assert_eq!(e.stats().question_number, 0);
        assert_eq!(e.wrong_count(), 1);
        let asked = run_pass(&mut e, |_| true);
        assert_eq!(asked.len(), 6);
        // "c" is still retakeable after a clean second pass.
        assert!(e.start_retake().is_ok());
    }

    #[test]
    fn reconfigure_preserves_selections_and_missed_history() {
        let mut e = engine();
        e.toggle_category("Psychology");
        e.start().unwrap();
        run_pass(&mut e, |t| t.term != "a");

        e.reconfigure();
        assert_eq!(e.phase(), Phase::Configuring);
        assert!(e.config().selected_categories.contains("Psychology"));
        assert_eq!(e.wrong_count(), 1);
        assert_eq!(e.stats().question_number, 0);
        assert!(e.current().is_none());
    }

    #[test]
    fn next_question_while_complete_changes_nothing() {
        let mut e = engine();
        e.start().unwrap();
        run_pass(&mut e, |_| true);
        assert!(e.is_complete());
        assert!(e.next_question().is_none());
        assert!(e.is_complete());
        assert_eq!(e.stats().question_number, 6);
    }

    #[test]
    fn inverse_mode_asks_for_definitions() {
        let mut e = engine();
        e.set_inverse_mode(true);
        e.start().unwrap();
        let t = e.current().unwrap().clone();
        let snapshot = e.snapshot();
        let question = snapshot.question.unwrap();
        assert_eq!(question.prompt, t.term);
        assert!(question.options.contains(&t.definition));
        let answered = e.answer(&t.definition).unwrap();
        assert!(answered.correct);
    }

    #[test]
    fn seeded_engines_draw_identically() {
        let mut a = QuizEngine::new(deck(), QuizConfig::default()).with_seed(9);
        let mut b = QuizEngine::new(deck(), QuizConfig::default()).with_seed(9);
        a.start().unwrap();
        b.start().unwrap();
        for _ in 0..6 {
            assert_eq!(
                a.current().map(|t| t.term.clone()),
                b.current().map(|t| t.term.clone())
            );
            assert_eq!(a.options(), b.options());
            let t = a.current().unwrap().term.clone();
            a.answer(&t).unwrap();
            b.answer(&t).unwrap();
            a.next_question();
            b.next_question();
        }
    }

    #[test]
    fn snapshot_reports_remaining_and_session_identity() {
        let mut e = engine();
        e.start().unwrap();
        let first = e.snapshot();
        assert_eq!(first.phase, Phase::InProgress);
        assert_eq!(first.remaining, 5);
        assert!(first.question.is_some());

        let t = e.current().unwrap().term.clone();
        e.answer(&t).unwrap();
        e.next_question();
        assert_eq!(e.snapshot().remaining, 4);
        assert_eq!(e.snapshot().session_id, first.session_id);

        let before = e.session_id();
        e.reconfigure();
        e.start().unwrap();
        assert_ne!(e.session_id(), before);
    }
}
