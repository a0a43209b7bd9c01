// Filesystem locations for persisted client data.
// Resolves per-user data and cache directories and per-key file paths.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "cueroom")
}

/// Base data directory (~/.local/share/cueroom on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Base cache directory (~/.cache/cueroom on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the client log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("cueroom.log"))
}

/// Path of the file holding a stored key.
pub fn key_path(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{}.json", sanitize_key(key)))
}

/// Sanitize a key for use as a file name.
/// Replaces path separators and reserved characters with underscores.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
