use directories::ProjectDirs;
use std::path::PathBuf;

/// Resolves where the game keeps its files: the key-value store under the
/// state directory, the results log under the config directory.
pub struct AppDirs;

impl AppDirs {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "openmind")
    }

    /// State directory: `~/.local/state/openmind` when HOME is set,
    /// otherwise the platform's local data dir.
    fn state_dir() -> Option<PathBuf> {
        std::env::var("HOME")
            .ok()
            .map(|home| [home.as_str(), ".local", "state", "openmind"].iter().collect())
            .or_else(|| Self::project_dirs().map(|pd| pd.data_local_dir().to_path_buf()))
    }

    pub fn store_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("store.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|pd| pd.config_dir().join("log.csv"))
    }
}
