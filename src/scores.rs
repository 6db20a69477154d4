//! High score leaderboard
//!
//! Persisted as `name,score` lines, one file per game mode, sorted
//! descending with only the top 10 kept. A missing file is an empty
//! leaderboard; malformed lines are skipped.

use std::fs;
use std::io;
use std::path::Path;

use crate::sim::GameMode;

/// Maximum number of entries kept on disk
pub const MAX_ENTRIES: usize = 10;

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Top-10 score table for one game mode
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

/// Result file for a mode
pub fn results_file(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Standard => "standard_results.txt",
        GameMode::Timed => "time_results.txt",
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load from disk. A missing file means an empty table; lines that do
    /// not parse as `name,score` are skipped.
    pub fn load(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            log::info!("no results at {}, starting fresh", path.display());
            return Self::new();
        };

        let mut entries = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let score = (fields.len() == 2)
                .then(|| fields[1].trim().parse::<u32>().ok())
                .flatten();
            match score {
                Some(score) => entries.push(ScoreEntry {
                    name: fields[0].to_string(),
                    score,
                }),
                None => log::warn!("skipping malformed result line {line:?}"),
            }
        }

        // Files written by older revisions may be unsorted
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Whether a score would make the table
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert sorted descending and truncate to the top 10. Returns the
    /// 1-indexed rank achieved, or None if the score didn't qualify.
    pub fn submit(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
        };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Rewrite the file with the current entries
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&format!("{},{}\n", e.name, e.score));
        }
        fs::write(path, out)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best score on the table, if any
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
