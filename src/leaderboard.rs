use crate::storage::KvStore;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::io;

/// Store key for the JSON-encoded entry array.
pub const LEADERBOARD_KEY: &str = "openmindLeaderboard";
/// Store key for the last-reset marker, string-encoded epoch milliseconds.
pub const RESET_MARKER_KEY: &str = "lastLeaderboardReset";

/// Leaderboard capacity; recording past it drops the lowest score.
pub const MAX_ENTRIES: usize = 10;
/// Marker age after which the startup check wipes the board (2 hours).
pub const RESET_INTERVAL_MS: i64 = 2 * 60 * 60 * 1000;

pub const EMPTY_PLACEHOLDER: &str = "No scores yet. Be the first to play!";

/// One recorded result. Immutable once created; recording is the only
/// mutation path into the board, there is no per-entry update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    pub timestamp: String,
}

/// Top-10 score list persisted through a [`KvStore`], descending by score
/// with ties kept in insertion order.
#[derive(Debug)]
pub struct Leaderboard {
    store: Box<dyn KvStore>,
}

impl Leaderboard {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Returns the persisted entries. Missing or unparsable data reads as
    /// an empty board, never an error.
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        self.store
            .get(LEADERBOARD_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Appends a result stamped with the current time, re-sorts descending
    /// by score (stable on ties), keeps the top [`MAX_ENTRIES`] and persists.
    pub fn record(&mut self, username: &str, score: u32) -> io::Result<()> {
        self.record_at(username, score, Utc::now())
    }

    fn record_at(&mut self, username: &str, score: u32, at: DateTime<Utc>) -> io::Result<()> {
        let mut entries = self.load();
        entries.push(LeaderboardEntry {
            username: username.to_string(),
            score,
            timestamp: at.to_rfc3339(),
        });

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);

        let data = serde_json::to_string(&entries).unwrap_or_default();
        self.store.set(LEADERBOARD_KEY, &data)
    }

    /// Read-only text projection with 1-based ranks.
    pub fn display(&self) -> String {
        let entries = self.load();
        if entries.is_empty() {
            return EMPTY_PLACEHOLDER.to_string();
        }

        let lines: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| format!("{:>2}. {:<20} {:>6} pts", idx + 1, e.username, e.score))
            .collect();
        lines.join("\n")
    }

    /// Startup-only TTL check: if no reset marker exists, or more than
    /// [`RESET_INTERVAL_MS`] has passed since it, the board is cleared and a
    /// fresh marker written at `now_ms`. Returns whether a reset happened.
    ///
    /// This fires lazily at process start, not on a background timer; a
    /// long-idle session resets stale data on its next launch.
    pub fn evaluate_auto_reset(&mut self, now_ms: i64) -> io::Result<bool> {
        let last_reset = self
            .store
            .get(RESET_MARKER_KEY)
            .and_then(|raw| raw.parse::<i64>().ok());

        match last_reset {
            Some(ts) if now_ms - ts <= RESET_INTERVAL_MS => Ok(false),
            _ => {
                self.store.remove(LEADERBOARD_KEY)?;
                self.store.set(RESET_MARKER_KEY, &now_ms.to_string())?;
                Ok(true)
            }
        }
    }
}
