//! quizdeck-store — durable wrong-answer aggregates.
//!
//! Implements the [`StatsSink`] seam with a JSON file store so missed-term
//! counts accumulate across sessions, plus an in-memory sink for tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quizdeck_core::traits::StatsSink;

/// The persisted aggregate: per-label miss counts and a running total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Miss count per category/subcategory label.
    #[serde(default)]
    pub wrong: BTreeMap<String, u64>,
    /// Total misses across all labels.
    #[serde(default)]
    pub total: u64,
    /// When the file was last written.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StatsSnapshot {
    /// Labels ordered worst-first (by count descending, then name).
    pub fn worst_categories(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            self.wrong.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.wrong.is_empty()
    }
}

/// A [`StatsSink`] backed by a JSON file.
///
/// Each miss is folded into the in-memory aggregate and the whole file is
/// rewritten. Write failures are logged rather than surfaced; losing one
/// tally must never abort a quiz.
pub struct FileStatsStore {
    path: PathBuf,
    state: Mutex<StatsSnapshot>,
}

impl FileStatsStore {
    /// Open the store at `path`, loading existing aggregates if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            load(&path)?
        } else {
            StatsSnapshot::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current aggregate.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.state.lock().unwrap().clone()
    }

    /// Clear all aggregates and persist the empty state.
    pub fn reset(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state = StatsSnapshot {
            updated_at: Some(Utc::now()),
            ..StatsSnapshot::default()
        };
        save(&self.path, &state)
    }
}

impl StatsSink for FileStatsStore {
    fn record_miss(&self, labels: &[&str]) {
        let mut state = self.state.lock().unwrap();
        for label in labels {
            *state.wrong.entry((*label).to_string()).or_insert(0) += 1;
        }
        state.total += 1;
        state.updated_at = Some(Utc::now());
        if let Err(e) = save(&self.path, &state) {
            tracing::warn!("failed to persist stats to {}: {e:#}", self.path.display());
        }
    }
}

/// Load an aggregate from a JSON file.
pub fn load(path: &Path) -> Result<StatsSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stats from {}", path.display()))?;
    let snapshot: StatsSnapshot =
        serde_json::from_str(&content).context("failed to parse stats JSON")?;
    Ok(snapshot)
}

fn save(path: &Path, snapshot: &StatsSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize stats")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write stats to {}", path.display()))?;
    Ok(())
}

/// A [`StatsSink`] that records calls in memory for assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    misses: Mutex<Vec<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `record_miss` call in order, one label list per call.
    pub fn misses(&self) -> Vec<Vec<String>> {
        self.misses.lock().unwrap().clone()
    }

    pub fn total(&self) -> usize {
        self.misses.lock().unwrap().len()
    }
}

impl StatsSink for MemorySink {
    fn record_miss(&self, labels: &[&str]) {
        self.misses
            .lock()
            .unwrap()
            .push(labels.iter().map(|s| s.to_string()).collect());
    }
}
