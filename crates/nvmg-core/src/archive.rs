//! Mapping from (version, host) to the distribution archive to fetch.
//!
//! Everything here is pure: the host target is passed in rather than read
//! from the running process, so every platform branch can be exercised
//! from any machine.

use nvmg_model::{ArchiveDescriptor, CanonicalVersion};
use nvmg_platform::{HostArch, HostOs, HostTarget};
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_DIST_URL: &str = "https://nodejs.org/dist/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionBaseError {
    #[error("invalid distribution URL '{url}': {details}")]
    Invalid { url: String, details: String },
    #[error("distribution URL '{url}' must use http or https")]
    UnsupportedScheme { url: String },
}

/// Validated base URL of a Node.js distribution server. Always ends in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionBase(Url);

impl DistributionBase {
    /// # Errors
    /// Returns an error if `raw` is not an absolute `http`/`https` URL.
    pub fn parse(raw: &str) -> Result<Self, DistributionBaseError> {
        let trimmed = raw.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        let mut url = Url::parse(&with_slash).map_err(|error| DistributionBaseError::Invalid {
            url: raw.to_string(),
            details: error.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(DistributionBaseError::UnsupportedScheme {
                url: raw.to_string(),
            });
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// URL of the release listing, `<base>index.json`.
    #[must_use]
    pub fn index_url(&self) -> Url {
        self.join_segments(&["index.json"])
    }

    fn join_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        url.path_segments_mut()
            .expect("http(s) base URLs always have path segments")
            .pop_if_empty()
            .extend(segments);
        url
    }
}

impl Default for DistributionBase {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_DIST_URL).expect("default distribution URL should parse"))
    }
}

/// Platform token and archive extension for an operating system.
/// Unknown systems fall back to the Linux tarball.
#[must_use]
pub fn platform_token(os: &HostOs) -> (&'static str, &'static str) {
    match os {
        HostOs::Darwin => ("darwin", "tar.gz"),
        HostOs::Windows => ("win", "zip"),
        HostOs::Solaris => ("sunos", "tar.gz"),
        HostOs::Linux | HostOs::Other(_) => ("linux", "tar.gz"),
    }
}

/// Architecture token used in archive names. Unknown architectures map to `x64`.
#[must_use]
pub fn arch_token(arch: &HostArch) -> &'static str {
    match arch {
        HostArch::X86 => "x86",
        HostArch::Arm64 => "arm64",
        HostArch::Ppc64 => "ppc64",
        HostArch::Ppc64le => "ppc64le",
        HostArch::S390x => "s390x",
        HostArch::X64 | HostArch::Other(_) => "x64",
    }
}

#[must_use]
pub fn archive_file_name(version: &CanonicalVersion, host: &HostTarget) -> String {
    let (platform, ext) = platform_token(&host.os);
    let arch = arch_token(&host.arch);
    format!("node-{version}-{platform}-{arch}.{ext}")
}

/// Name the archive for `version` on `host` and resolve its URL under `base`.
#[must_use]
pub fn describe(
    version: &CanonicalVersion,
    host: &HostTarget,
    base: &DistributionBase,
) -> ArchiveDescriptor {
    let file_name = archive_file_name(version, host);
    let url = base.join_segments(&[&version.to_string(), &file_name]);
    ArchiveDescriptor {
        file_name,
        url: url.to_string(),
    }
}
