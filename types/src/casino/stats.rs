use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{MAX_HIGHSCORES, MAX_NAME_LENGTH};

/// Cross-session running statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_games: u64,
    pub best_score: u64,
}

impl Stats {
    /// Fold a finished round into the statistics.
    pub fn record_round(&mut self, final_score: u64) {
        self.total_games = self.total_games.saturating_add(1);
        self.best_score = self.best_score.max(final_score);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreEntry {
    pub score: u64,
    pub player_name: String,
    pub timestamp_ms: u64,
    pub rank: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighscoreSummary {
    pub total_entries: usize,
    pub highest: u64,
    /// Mean score rounded to the nearest integer.
    pub average: u64,
    pub distinct_players: usize,
}

/// Top scores, best first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highscores {
    pub entries: Vec<HighscoreEntry>,
}

impl Highscores {
    /// Insert a score, keeping the table sorted and at most [`MAX_HIGHSCORES`] long.
    ///
    /// Returns the 1-based rank the score landed at, or `None` if it did not make the table.
    pub fn insert(&mut self, player_name: &str, score: u64, timestamp_ms: u64) -> Option<u32> {
        let player_name: String = player_name.chars().take(MAX_NAME_LENGTH).collect();

        // Ties keep the earlier entry ahead
        let pos = self.entries.partition_point(|e| e.score >= score);
        if pos >= MAX_HIGHSCORES {
            return None;
        }
        self.entries.insert(
            pos,
            HighscoreEntry {
                score,
                player_name,
                timestamp_ms,
                rank: 0,
            },
        );
        self.entries.truncate(MAX_HIGHSCORES);
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = (i + 1) as u32;
        }
        Some((pos + 1) as u32)
    }

    /// Entries recorded at or after `timestamp_ms`, in table order.
    pub fn since(&self, timestamp_ms: u64) -> Vec<&HighscoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp_ms >= timestamp_ms)
            .collect()
    }

    pub fn summary(&self) -> HighscoreSummary {
        let total_entries = self.entries.len();
        if total_entries == 0 {
            return HighscoreSummary::default();
        }
        let sum: u128 = self.entries.iter().map(|e| e.score as u128).sum();
        let average = (sum as f64 / total_entries as f64).round() as u64;
        let distinct_players = self
            .entries
            .iter()
            .map(|e| e.player_name.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        HighscoreSummary {
            total_entries,
            highest: self.entries.iter().map(|e| e.score).max().unwrap_or(0),
            average,
            distinct_players,
        }
    }
}
