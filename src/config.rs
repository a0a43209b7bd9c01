// Runtime configuration.
// Read once from environment variables at startup; bad values fall back to defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::storage::paths;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_SETTINGS_POLL_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the platform server.
    pub base_url: String,
    /// Directory holding the persisted session. `None` disables persistence.
    pub data_dir: Option<PathBuf>,
    /// How often the animation settings are refetched.
    pub settings_poll_interval: Duration,
    /// Per-request timeout for API calls.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_secs = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(default)
        };

        Self {
            base_url: lookup("CUEROOM_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            data_dir: lookup("CUEROOM_DATA_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .or_else(paths::data_dir),
            settings_poll_interval: Duration::from_secs(parse_secs(
                "CUEROOM_SETTINGS_POLL_SECS",
                DEFAULT_SETTINGS_POLL_SECS,
            )),
            request_timeout: Duration::from_secs(parse_secs(
                "CUEROOM_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        }
    }
}
