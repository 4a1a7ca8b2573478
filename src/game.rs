use crate::leaderboard::Leaderboard;
use crate::levels::{Level, ScoreTable, LEVELS, SCORES};
use crate::session::{SessionState, LEVEL_TIME_SECS, LOW_TIME_WARN_SECS};
use crate::util::normalize;
use chrono::prelude::*;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Which screen the session is on. `LevelComplete` carries what the
/// presentation layer needs to show: the revealed word and the points
/// just awarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Landing,
    Playing,
    LevelComplete { word: String, points: u32 },
    GameComplete,
    Leaderboard,
}

/// Result of a guess submission. An incorrect guess is a recoverable
/// outcome, not an error: the level, score and countdown are untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct { word: String, points: u32 },
    Incorrect,
}

/// Rejection of `start_game` on a whitespace-only username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyUsername;

impl std::fmt::Display for EmptyUsername {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "username must not be empty")
    }
}

impl std::error::Error for EmptyUsername {}

/// Something the tick path made happen that the UI should surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    TimeExpired,
}

/// The session controller: owns level index, score, username and the
/// countdown, and drives Landing -> Playing -> LevelComplete -> ... ->
/// GameComplete. Finished games are pushed into the leaderboard store
/// when one is attached.
#[derive(Debug)]
pub struct Game {
    pub levels: &'static [Level],
    pub scores: ScoreTable,
    pub session: SessionState,
    pub phase: Phase,
    view_return: Option<Phase>,
    pub leaderboard: Option<Leaderboard>,
    results_log: Option<PathBuf>,
}

impl Game {
    pub fn new(leaderboard: Option<Leaderboard>) -> Self {
        Self {
            levels: &LEVELS,
            scores: SCORES,
            session: SessionState::default(),
            phase: Phase::Landing,
            view_return: None,
            leaderboard,
            results_log: None,
        }
    }

    /// Attaches the results-log file; without one, completed games are not
    /// logged (keeps tests free of filesystem side effects).
    pub fn with_results_log(mut self, path: Option<PathBuf>) -> Self {
        self.results_log = path;
        self
    }

    /// The level currently in play. The index is kept in range by
    /// `advance_level`, which stops incrementing once the sequence ends.
    pub fn current_level(&self) -> &Level {
        &self.levels[self.session.current_level]
    }

    /// 1-based level number for display ("Level 3/5").
    pub fn level_number(&self) -> usize {
        self.session.current_level + 1
    }

    pub fn is_final_level(&self) -> bool {
        self.session.current_level == self.levels.len() - 1
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.countdown.remaining_secs()
    }

    pub fn low_time(&self) -> bool {
        self.session.countdown.is_running() && self.time_remaining() <= LOW_TIME_WARN_SECS
    }

    /// Starts a fresh game for `raw_username`. A username that is empty
    /// after trimming is rejected and nothing changes.
    pub fn start_game(&mut self, raw_username: &str) -> Result<(), EmptyUsername> {
        let username = raw_username.trim();
        if username.is_empty() {
            return Err(EmptyUsername);
        }

        self.session.username = username.to_string();
        self.session.current_level = 0;
        self.session.score = 0;
        self.phase = Phase::Playing;
        self.load_level();
        Ok(())
    }

    /// (Re)arms the 30-second countdown for the current level. Any prior
    /// countdown is cancelled by the restart, so at most one runs.
    pub fn load_level(&mut self) {
        self.session.countdown.start(LEVEL_TIME_SECS);
    }

    /// Checks a guess against the current level's target word, trimmed and
    /// case-folded on both sides. Only meaningful in `Playing`.
    pub fn submit_answer(&mut self, raw_input: &str) -> SubmitOutcome {
        if self.phase != Phase::Playing {
            return SubmitOutcome::Incorrect;
        }

        let level = self.current_level();
        if normalize(raw_input) != normalize(level.word) {
            return SubmitOutcome::Incorrect;
        }

        let points = if self.is_final_level() {
            self.scores.bonus
        } else {
            self.scores.regular
        };
        let word = level.word.to_string();

        self.session.countdown.cancel();
        self.session.score += points;
        self.phase = Phase::LevelComplete {
            word: word.clone(),
            points,
        };
        SubmitOutcome::Correct { word, points }
    }

    /// Moves on from a completed (or expired) level: next level if any
    /// remain, otherwise game over. Never indexes past the level array.
    /// Only meaningful mid-game; in particular a finished game is never
    /// recorded twice.
    pub fn advance_level(&mut self) {
        if !matches!(self.phase, Phase::Playing | Phase::LevelComplete { .. }) {
            return;
        }

        if self.session.current_level + 1 < self.levels.len() {
            self.session.current_level += 1;
            self.phase = Phase::Playing;
            self.load_level();
        } else {
            self.session.countdown.cancel();
            self.phase = Phase::GameComplete;
            self.finish();
        }
    }

    /// Advances the countdown while playing. Expiry fails the level with no
    /// penalty and funnels into the same advance path as a solved level.
    pub fn on_tick(&mut self, elapsed_ms: u64) -> Option<TickEvent> {
        if self.phase != Phase::Playing {
            return None;
        }
        if self.session.countdown.on_tick(elapsed_ms) {
            self.advance_level();
            return Some(TickEvent::TimeExpired);
        }
        None
    }

    /// Back to the landing screen from anywhere: countdown cancelled,
    /// username cleared.
    pub fn reset_to_landing(&mut self) {
        self.session.countdown.cancel();
        self.session.username.clear();
        self.view_return = None;
        self.phase = Phase::Landing;
    }

    /// Switches to the leaderboard screen, remembering where the viewer
    /// came from. Does not touch game progress.
    pub fn view_leaderboard(&mut self) {
        if self.phase != Phase::Leaderboard {
            self.view_return = Some(std::mem::replace(&mut self.phase, Phase::Leaderboard));
        }
    }

    /// Leaves the leaderboard screen, restoring the prior phase.
    pub fn return_from_leaderboard(&mut self) {
        if self.phase == Phase::Leaderboard {
            self.phase = self.view_return.take().unwrap_or(Phase::Landing);
        }
    }

    fn finish(&mut self) {
        let username = self.session.username.clone();
        let score = self.session.score;
        if let Some(board) = self.leaderboard.as_mut() {
            let _ = board.record(&username, score);
        }
        let _ = self.log_result();
    }

    /// Appends one CSV line per completed game to the attached results log.
    fn log_result(&self) -> io::Result<()> {
        if let Some(log_path) = &self.results_log {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // If the log doesn't exist yet, we need to emit a header
            let needs_header = !log_path.exists();

            let mut log_file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(log_path)?;

            if needs_header {
                writeln!(log_file, "date,username,score")?;
            }

            writeln!(
                log_file,
                "{},{},{}",
                Local::now().format("%c"),
                self.session.username,
                self.session.score,
            )?;
        }

        Ok(())
    }
}
