//! CLI configuration: deck location, stats file, and flat categories.
//!
//! Resolution order: an explicit `--config` path, then `quizdeck.toml` in the
//! working directory, then `~/.config/quizdeck/config.toml`, then built-in
//! defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Deck CSV used when no `--deck` override is given.
    #[serde(default = "default_deck")]
    pub deck: PathBuf,

    /// Where missed-answer aggregates are persisted.
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,

    /// Categories whose subcategory labels are not a meaningful grouping
    /// (people, standalone theories). Distractors for these are drawn by
    /// category only.
    #[serde(default = "default_flat_categories")]
    pub flat_categories: Vec<String>,
}

fn default_deck() -> PathBuf {
    PathBuf::from("decks/starter.csv")
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("quizdeck-stats.json")
}

fn default_flat_categories() -> Vec<String> {
    vec!["People".to_string(), "Theories".to_string()]
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            deck: default_deck(),
            stats_file: default_stats_file(),
            flat_categories: default_flat_categories(),
        }
    }
}

/// Load configuration, falling back to defaults when no file is found.
pub fn load_config_from(explicit: Option<&Path>) -> Result<CliConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
        return read_config(path);
    }

    let local = Path::new("quizdeck.toml");
    if local.exists() {
        return read_config(local);
    }

    if let Some(path) = user_config_path() {
        if path.exists() {
            return read_config(&path);
        }
    }

    Ok(CliConfig::default())
}

fn read_config(path: &Path) -> Result<CliConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: CliConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("quizdeck")
            .join("config.toml")
    })
}
