use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;

use crate::error::ResolutionError;

/// A resolved release tag, always rendered as `v<major>.<minor>.<patch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalVersion(semver::Version);

impl CanonicalVersion {
    #[must_use]
    pub fn new(version: semver::Version) -> Self {
        Self(version)
    }

    #[must_use]
    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }

    #[must_use]
    pub fn major(&self) -> u64 {
        self.0.major
    }

    #[must_use]
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    #[must_use]
    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl From<semver::Version> for CanonicalVersion {
    fn from(version: semver::Version) -> Self {
        Self::new(version)
    }
}

impl fmt::Display for CanonicalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LtsSelector {
    Any,
    Codename(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    Latest,
    Lts(LtsSelector),
    Unsupported,
}

/// A named alias such as `stable` or `lts/iron`, kept with the spelling the
/// user typed so error messages can echo it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAlias {
    name: String,
    target: AliasTarget,
}

impl NamedAlias {
    /// Recognize a built-in alias name. Returns `None` for anything that
    /// should be treated as a version number instead.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let target = match lower.as_str() {
            "node" | "stable" | "latest" | "current" => AliasTarget::Latest,
            "lts" | "lts/*" => AliasTarget::Lts(LtsSelector::Any),
            "system" | "iojs" | "unstable" | "default" => AliasTarget::Unsupported,
            other => match other.strip_prefix("lts/") {
                Some(codename) if !codename.is_empty() => {
                    AliasTarget::Lts(LtsSelector::Codename(codename.to_string()))
                }
                _ => return None,
            },
        };

        Some(Self {
            name: name.to_string(),
            target,
        })
    }

    #[must_use]
    pub fn lts() -> Self {
        Self {
            name: "lts/*".to_string(),
            target: AliasTarget::Lts(LtsSelector::Any),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn target(&self) -> &AliasTarget {
        &self.target
    }
}

impl fmt::Display for NamedAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpecifier {
    Explicit(String),
    NamedAlias(NamedAlias),
}

impl VersionSpecifier {
    /// Classify raw user input. A single leading `v` is stripped before
    /// anything else is checked.
    ///
    /// # Errors
    /// Returns [`ResolutionError::Empty`] when nothing is left after trimming
    /// and stripping the prefix.
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let trimmed = input.trim();
        let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if stripped.is_empty() {
            return Err(ResolutionError::Empty);
        }

        Ok(match NamedAlias::from_name(stripped) {
            Some(alias) => Self::NamedAlias(alias),
            None => Self::Explicit(stripped.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDescriptor {
    pub file_name: String,
    pub url: String,
}

/// One row of the distribution's `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseEntry {
    pub version: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lts")]
    pub lts: Option<String>,
    #[serde(default)]
    pub security: bool,
}

// `lts` is `false` for current releases and the codename string otherwise.
fn deserialize_lts<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLts {
        Flag(bool),
        Codename(String),
    }

    Ok(match Option::<RawLts>::deserialize(deserializer)? {
        Some(RawLts::Codename(codename)) => Some(codename),
        Some(RawLts::Flag(_)) | None => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Resolving,
    Naming,
    Downloading,
    Extracting,
    Placing,
    Done,
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolving => "resolving",
            Self::Naming => "naming",
            Self::Downloading => "downloading",
            Self::Extracting => "extracting",
            Self::Placing => "placing",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProgress {
    Phase(InstallPhase),
    Downloading { downloaded: u64, total: Option<u64> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub version: CanonicalVersion,
    pub path: PathBuf,
}
