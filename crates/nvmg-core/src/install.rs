use std::path::{Path, PathBuf};

use log::{debug, info};
use nvmg_model::{
    AliasTarget, CanonicalVersion, Distribution, DownloadError, InstallError, InstallOutcome,
    InstallPhase, NamedAlias, ProgressSink, ResolutionError, VersionSpecifier,
};
use nvmg_platform::HostTarget;

use crate::archive::{self, DistributionBase};
use crate::{extract, index, place, resolver};

/// Drives resolve → name → download → extract → place for one specifier at
/// a time. Stages run strictly in sequence and nothing is retried.
pub struct Installer<D> {
    distribution: D,
    host: HostTarget,
    base: DistributionBase,
    temp_base: PathBuf,
    progress: ProgressSink,
}

impl<D: Distribution> Installer<D> {
    #[must_use]
    pub fn new(distribution: D, host: HostTarget) -> Self {
        Self {
            distribution,
            host,
            base: DistributionBase::default(),
            temp_base: std::env::temp_dir(),
            progress: ProgressSink::disabled(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: DistributionBase) -> Self {
        self.base = base;
        self
    }

    /// Directory under which the transient download and staging
    /// directories are created.
    #[must_use]
    pub fn with_temp_dir(mut self, temp_base: PathBuf) -> Self {
        self.temp_base = temp_base;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    /// Resolve a specifier, consulting the release index for named aliases.
    ///
    /// # Errors
    /// Returns a resolution error for malformed or unknown specifiers and a
    /// download error if the release index cannot be fetched.
    pub async fn resolve(&self, specifier: &str) -> Result<CanonicalVersion, InstallError> {
        match VersionSpecifier::parse(specifier)? {
            VersionSpecifier::Explicit(_) => Ok(resolver::resolve(specifier)?),
            VersionSpecifier::NamedAlias(alias) => self.resolve_alias(&alias).await,
        }
    }

    async fn resolve_alias(&self, alias: &NamedAlias) -> Result<CanonicalVersion, InstallError> {
        if alias.target() == &AliasTarget::Unsupported {
            return Err(ResolutionError::AliasNotSupported {
                alias: alias.name().to_string(),
            }
            .into());
        }

        let index_url = self.base.index_url();
        let entries = self
            .distribution
            .release_index(index_url.as_str())
            .await?;
        let version = index::resolve_alias(alias, &entries)?;
        info!("Resolved alias {alias} to {version}");
        Ok(version)
    }

    /// Install `specifier` into `<managed_root>/<version>/`.
    ///
    /// # Errors
    /// Returns the first failing stage's error. Nothing written before the
    /// failure is rolled back.
    pub async fn install(
        &self,
        specifier: &str,
        managed_root: &Path,
    ) -> Result<InstallOutcome, InstallError> {
        let result = self.run(specifier, managed_root).await;
        if let Err(error) = &result {
            debug!("Install of '{specifier}' failed: {error}");
        }
        result
    }

    async fn run(
        &self,
        specifier: &str,
        managed_root: &Path,
    ) -> Result<InstallOutcome, InstallError> {
        self.progress.phase(InstallPhase::Resolving).await;
        let version = self.resolve(specifier).await?;

        self.progress.phase(InstallPhase::Naming).await;
        let descriptor = archive::describe(&version, &self.host, &self.base);
        info!(
            "Installing {version} for {} from {}",
            self.host, descriptor.url
        );

        self.progress.phase(InstallPhase::Downloading).await;
        let download_dir = tempfile::Builder::new()
            .prefix(".nvmg-download")
            .tempdir_in(&self.temp_base)
            .map_err(|error| DownloadError::write(&descriptor.file_name, &self.temp_base, &error))?;
        let archive_path = download_dir.path().join(&descriptor.file_name);
        self.distribution
            .download(
                &descriptor.url,
                &descriptor.file_name,
                &archive_path,
                &self.progress,
            )
            .await?;

        self.progress.phase(InstallPhase::Extracting).await;
        let staged = extract::extract(&archive_path, &self.temp_base)?;
        drop(download_dir);

        self.progress.phase(InstallPhase::Placing).await;
        let dest = managed_root.join(version.to_string());
        place::place(staged.root(), &dest)?;
        drop(staged);

        info!("Installed {version} to {}", dest.display());
        self.progress.phase(InstallPhase::Done).await;
        Ok(InstallOutcome {
            version,
            path: dest,
        })
    }
}
