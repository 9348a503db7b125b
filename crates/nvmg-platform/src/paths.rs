use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "nvmg";
const MANAGED_ROOT_DIR: &str = ".nvmg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine cache directory")]
    CacheDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Build application paths for the current platform.
    ///
    /// # Errors
    /// Returns an error when a required base directory (for example the user
    /// config/cache/data directory) cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        Ok(Self {
            config_dir: dirs::config_dir()
                .ok_or(AppPathsError::ConfigDirUnavailable)?
                .join(APP_DIR),
            cache_dir: dirs::cache_dir()
                .ok_or(AppPathsError::CacheDirUnavailable)?
                .join(APP_DIR),
            data_dir: dirs::data_dir()
                .ok_or(AppPathsError::DataDirUnavailable)?
                .join(APP_DIR),
        })
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log")
    }

    /// Ensure all application directories exist on disk.
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

/// `~/.nvmg`, used when nothing else names a managed root.
///
/// # Errors
/// Returns an error when the home directory cannot be determined.
pub fn default_managed_root() -> Result<PathBuf, AppPathsError> {
    dirs::home_dir()
        .map(|home| home.join(MANAGED_ROOT_DIR))
        .ok_or(AppPathsError::HomeDirUnavailable)
}
