//! Interactive multiple-choice quiz session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use quizdeck_core::config::QuizConfig;
use quizdeck_core::engine::QuizEngine;
use quizdeck_core::statistics::SessionStats;
use quizdeck_store::FileStatsStore;

use crate::config;

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[allow(clippy::too_many_arguments)]
pub fn execute(
    deck_path: Option<PathBuf>,
    categories: Option<String>,
    subcategories: Option<String>,
    subsections: Option<String>,
    all: bool,
    inverse: bool,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cli_config = config::load_config_from(config_path.as_deref())?;
    let deck = super::load_deck(&cli_config, deck_path.as_deref())?;

    let store = Arc::new(FileStatsStore::open(&cli_config.stats_file)?);
    let mut engine = QuizEngine::with_sink(deck, QuizConfig::default(), store);
    if let Some(seed) = seed {
        engine = engine.with_seed(seed);
    }

    engine.set_all_categories(all);
    for category in split_selections(categories.as_deref()) {
        engine.toggle_category(&category);
    }
    for subcategory in split_selections(subcategories.as_deref()) {
        engine.toggle_subcategory(&subcategory);
    }
    for subsection in split_selections(subsections.as_deref()) {
        engine.toggle_subsection(&subsection);
    }
    engine.set_inverse_mode(inverse);

    engine.start()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        if run_pass(&mut engine, &mut input)? == PassOutcome::Quit {
            println!();
            print_score(engine.stats());
            break;
        }
        print_summary(&engine);
        if !prompt_next_round(&mut engine, &mut input)? {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum PassOutcome {
    Completed,
    Quit,
}

/// Ask questions until the pass completes or the player quits.
fn run_pass(engine: &mut QuizEngine, input: &mut impl BufRead) -> Result<PassOutcome> {
    loop {
        let snapshot = engine.snapshot();
        let Some(question) = snapshot.question else {
            return Ok(PassOutcome::Completed);
        };

        println!();
        println!(
            "Question {}: {}",
            snapshot.stats.question_number + 1,
            question.prompt
        );
        for (letter, option) in OPTION_LETTERS.iter().zip(&question.options) {
            println!("  {letter}) {option}");
        }

        let choice = loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(PassOutcome::Quit);
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(PassOutcome::Quit);
            }
            match resolve_choice(&line, &question.options) {
                Some(choice) => break choice,
                None => {
                    let last = OPTION_LETTERS[question.options.len() - 1];
                    println!("Pick one of the listed options (A-{last}) or q to quit.");
                }
            }
        };

        let answered = engine.answer(&choice)?;
        if answered.correct {
            println!("Correct!");
        } else {
            println!("Incorrect. The answer is: {}", answered.correct_answer);
        }

        engine.next_question();
    }
}

/// Map player input to an option: a single letter picks by position,
/// anything else must match an option's text exactly.
fn resolve_choice(line: &str, options: &[String]) -> Option<String> {
    if line.len() == 1 {
        let letter = line.chars().next()?.to_ascii_uppercase();
        if let Some(index) = OPTION_LETTERS.iter().position(|&l| l == letter) {
            return options.get(index).cloned();
        }
    }
    options.iter().find(|o| o.as_str() == line).cloned()
}

fn print_summary(engine: &QuizEngine) {
    let stats = engine.stats();

    println!();
    if engine.retake_mode() {
        println!("Retake complete.");
    } else {
        println!("Quiz complete.");
    }
    print_score(stats);

    if !stats.wrong_by_category.is_empty() {
        println!("Missed by category:");
        for (label, count) in &stats.wrong_by_category {
            println!("  {label}: {count}");
        }
    }
}

fn print_score(stats: &SessionStats) {
    println!(
        "Score: {}/{} ({:.0}%)",
        stats.correct,
        stats.correct + stats.wrong,
        stats.accuracy() * 100.0
    );
}

/// Offer follow-up rounds. Returns false when the player is done.
fn prompt_next_round(engine: &mut QuizEngine, input: &mut impl BufRead) -> Result<bool> {
    loop {
        println!();
        if engine.wrong_count() > 0 {
            println!("[r] retake missed  [s] same quiz  [q] quit");
        } else {
            println!("[s] same quiz  [q] quit");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        match line.to_ascii_lowercase().as_str() {
            "r" if engine.wrong_count() > 0 => {
                engine.start_retake()?;
                return Ok(true);
            }
            "s" => {
                engine.retake_same()?;
                return Ok(true);
            }
            "q" => return Ok(false),
            _ => {}
        }
    }
}

/// Read one trimmed line, `None` on end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn split_selections(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_selections_trims_and_drops_empties() {
        assert_eq!(
            split_selections(Some("Psychology, Sociology ,,")),
            vec!["Psychology", "Sociology"]
        );
        assert!(split_selections(None).is_empty());
        assert!(split_selections(Some("")).is_empty());
    }

    #[test]
    fn resolve_choice_accepts_letters_and_text() {
        let options = vec!["alpha".to_string(), "beta".to_string()];
        assert_eq!(resolve_choice("a", &options), Some("alpha".to_string()));
        assert_eq!(resolve_choice("B", &options), Some("beta".to_string()));
        assert_eq!(resolve_choice("beta", &options), Some("beta".to_string()));
        assert_eq!(resolve_choice("C", &options), None);
        assert_eq!(resolve_choice("gamma", &options), None);
    }
}
