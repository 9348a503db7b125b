use std::path::PathBuf;
use std::time::Duration;

use nvmg_core::DistributionBase;
use nvmg_platform::{HostTarget, default_managed_root};

use crate::cli::Cli;
use crate::error::AppError;
use crate::settings::Settings;

/// Everything an install run needs, after command line, environment and
/// settings file have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub managed_root: PathBuf,
    pub base: DistributionBase,
    pub host: HostTarget,
    pub temp_dir: PathBuf,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RunConfig {
    /// Command line (including its environment fallbacks) wins over the
    /// settings file, which wins over built-in defaults.
    ///
    /// # Errors
    /// Returns an error if the mirror URL is invalid or no managed root can be
    /// determined.
    pub fn resolve(cli: &Cli, settings: &Settings) -> Result<Self, AppError> {
        let managed_root = match cli.dir.clone().or_else(|| settings.nvmg_dir.clone()) {
            Some(dir) => dir,
            None => {
                default_managed_root().map_err(|error| AppError::invalid_config("nvmg_dir", error))?
            }
        };

        let base = match cli
            .node_dist_mirror
            .as_deref()
            .or(settings.node_dist_mirror.as_deref())
        {
            Some(mirror) => DistributionBase::parse(mirror)
                .map_err(|error| AppError::invalid_config("node_dist_mirror", error))?,
            None => DistributionBase::default(),
        };

        Ok(Self {
            managed_root,
            base,
            host: HostTarget::with_overrides(cli.os.clone(), cli.arch.clone()),
            temp_dir: cli.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
            timeout: Duration::from_secs(settings.http_timeout_secs),
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
        })
    }
}
