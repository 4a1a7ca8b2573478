/// Seconds given to solve each level.
pub const LEVEL_TIME_SECS: u32 = 30;

/// Threshold at or below which the timer display switches to its warning style.
pub const LOW_TIME_WARN_SECS: u32 = 10;

/// Cancellable per-level countdown, fed by runtime ticks.
///
/// Ticks arrive in sub-second increments; whole elapsed milliseconds are
/// folded into a carry and the remaining time only ever moves in whole
/// seconds. Restarting the countdown clears the carry, so time accrued
/// against a previous level can never decrement the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    carry_ms: u64,
    running: bool,
}

impl Countdown {
    pub fn idle() -> Self {
        Self {
            remaining_secs: 0,
            carry_ms: 0,
            running: false,
        }
    }

    /// Starts (or restarts) the countdown at `secs`. Any prior countdown is
    /// implicitly cancelled; at most one is ever running per session.
    pub fn start(&mut self, secs: u32) {
        self.remaining_secs = secs;
        self.carry_ms = 0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.carry_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Advances the countdown by `elapsed_ms`. Returns true exactly once,
    /// on the tick that exhausts the remaining time.
    pub fn on_tick(&mut self, elapsed_ms: u64) -> bool {
        if !self.running {
            return false;
        }

        self.carry_ms += elapsed_ms;
        while self.carry_ms >= 1000 && self.remaining_secs > 0 {
            self.carry_ms -= 1000;
            self.remaining_secs -= 1;
        }

        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}

/// Mutable per-game state owned by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_level: usize,
    pub score: u32,
    pub username: String,
    pub countdown: Countdown,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_level: 0,
            score: 0,
            username: String::new(),
            countdown: Countdown::idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_starts_idle() {
        let cd = Countdown::idle();
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_secs(), 0);
    }

    #[test]
    fn test_countdown_decrements_once_per_second() {
        let mut cd = Countdown::idle();
        cd.start(30);

        // nine 100ms ticks: not a full second yet
        for _ in 0..9 {
            assert!(!cd.on_tick(100));
        }
        assert_eq!(cd.remaining_secs(), 30);

        // tenth tick completes the second
        assert!(!cd.on_tick(100));
        assert_eq!(cd.remaining_secs(), 29);
    }

    #[test]
    fn test_countdown_expires_exactly_once() {
        let mut cd = Countdown::idle();
        cd.start(2);

        assert!(!cd.on_tick(1000));
        assert_eq!(cd.remaining_secs(), 1);

        assert!(cd.on_tick(1000));
        assert_eq!(cd.remaining_secs(), 0);
        assert!(!cd.is_running());

        // further ticks are inert
        assert!(!cd.on_tick(1000));
        assert_eq!(cd.remaining_secs(), 0);
    }

    #[test]
    fn test_countdown_cancel_stops_ticking() {
        let mut cd = Countdown::idle();
        cd.start(5);
        cd.cancel();

        assert!(!cd.on_tick(10_000));
        assert_eq!(cd.remaining_secs(), 5);
    }

    #[test]
    fn test_restart_clears_carry_no_double_decrement() {
        let mut cd = Countdown::idle();
        cd.start(30);

        // 900ms of the old level's time accrued
        assert!(!cd.on_tick(900));
        assert_eq!(cd.remaining_secs(), 30);

        // new level starts; the stale 900ms must not count
        cd.start(30);
        assert!(!cd.on_tick(100));
        assert_eq!(cd.remaining_secs(), 30);

        assert!(!cd.on_tick(900));
        assert_eq!(cd.remaining_secs(), 29);
    }

    #[test]
    fn test_countdown_handles_large_tick() {
        let mut cd = Countdown::idle();
        cd.start(3);

        // one oversized tick burns through everything but never goes negative
        assert!(cd.on_tick(10_000));
        assert_eq!(cd.remaining_secs(), 0);
    }

    #[test]
    fn test_session_state_default() {
        let state = SessionState::default();
        assert_eq!(state.current_level, 0);
        assert_eq!(state.score, 0);
        assert!(state.username.is_empty());
        assert!(!state.countdown.is_running());
    }
}
