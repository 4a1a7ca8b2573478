// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod game;
pub mod leaderboard;
pub mod levels;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod util;
