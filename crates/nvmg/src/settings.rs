use serde::Deserialize;
use std::path::{Path, PathBuf};

use nvmg_core::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
use nvmg_platform::AppPaths;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub nvmg_dir: Option<PathBuf>,

    #[serde(default)]
    pub node_dist_mirror: Option<String>,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_http_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_secs()
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nvmg_dir: None,
            node_dist_mirror: None,
            http_timeout_secs: default_http_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl Settings {
    /// Read `settings.json` from the user config directory. Anything missing
    /// or unreadable falls back to the defaults; the second value explains why
    /// a file that exists was ignored.
    pub fn load() -> (Self, Option<String>) {
        let Ok(paths) = AppPaths::new() else {
            return (Self::default(), None);
        };
        Self::load_from(&paths.settings_file())
    }

    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|error| format!("Could not read settings file {}: {error}", path.display()))
            .and_then(|content| {
                serde_json::from_str(&content).map_err(|error| {
                    format!("Ignoring invalid settings file {}: {error}", path.display())
                })
            });

        match parsed {
            Ok(settings) => (settings, None),
            Err(warning) => (Self::default(), Some(warning)),
        }
    }
}
