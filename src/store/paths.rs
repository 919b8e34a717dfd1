// Store path utilities.
// Resolves where the tracked-forecast file lives when no path is configured.

use std::path::PathBuf;

use directories::ProjectDirs;

pub const STORE_FILE_NAME: &str = "tracked_forecasts.json";

/// Get the base data directory (~/.local/share/golfcast on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "golfcast").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the tracked-forecast file, falling back to the working directory.
pub fn default_store_path() -> PathBuf {
    data_dir()
        .map(|dir| dir.join(STORE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME))
}
