//! Workspace scaffolding: starter config and sample deck.

use std::path::Path;

use anyhow::{Context, Result};

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration
deck = "decks/starter.csv"
stats_file = "quizdeck-stats.json"

# Categories whose subcategory labels are not a meaningful grouping;
# distractors for these are drawn by category only.
flat_categories = ["People", "Theories"]
"#;

const SAMPLE_DECK: &str = r#"Working memory,Short-term storage used during active reasoning,Psychology,Memory,6A
Semantic memory,Long-term store of facts and general knowledge,Psychology,Memory,6A
Operant conditioning,Learning through reinforcement and punishment,Psychology,Learning,6B
Classical conditioning,"Learning by pairing a neutral stimulus with one that, by itself, triggers a response",Psychology,Learning,6B
Groupthink,Conformity within a cohesive group that suppresses dissent,Sociology,Groups,8A
Social loafing,Reduced individual effort when working in a group,Sociology,Groups,8A
Role strain,Tension between demands within a single role,Sociology,Roles,8B
Role conflict,Tension between demands of different roles,Sociology,Roles,8B
Anomie,Normlessness following rapid social change,Sociology,Theory,8C
B.F. Skinner,Behaviorist who studied operant conditioning with reinforcement schedules,People,,
Stanley Milgram,Social psychologist known for obedience-to-authority experiments,People,,
Jean Piaget,Developmental psychologist who proposed stages of cognitive development,People,,
Labeling theory,Deviance arises from the labels society applies to behavior,Theories,,
Conflict theory,Society is shaped by competition over scarce resources,Theories,,
"#;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizdeck.toml"), SAMPLE_CONFIG, "config")?;

    std::fs::create_dir_all("decks").context("failed to create decks directory")?;
    write_if_missing(Path::new("decks/starter.csv"), SAMPLE_DECK, "sample deck")?;

    println!();
    println!("Next steps:");
    println!("  1. Put your own deck CSVs under decks/");
    println!("  2. Check a deck with: quizdeck validate --deck decks/starter.csv");
    println!("  3. Start a quiz with: quizdeck quiz --all");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str, what: &str) -> Result<()> {
    if path.exists() {
        println!("Skipping {what}: {} already exists", path.display());
        return Ok(());
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {what}: {}", path.display());
    Ok(())
}
