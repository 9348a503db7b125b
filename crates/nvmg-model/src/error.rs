use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Version specifier is empty")]
    Empty,

    #[error("Alias '{alias}' is not yet supported")]
    AliasNotSupported { alias: String },

    #[error("No release matches alias '{alias}'")]
    AliasNotFound { alias: String },

    #[error("Version not found: {input} ({reason})")]
    VersionNotFound { input: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error("Failed to download {file_name} from {url}: {details}")]
    Request {
        file_name: String,
        url: String,
        details: String,
    },

    #[error("Download of {file_name} failed with HTTP {status}")]
    Status {
        file_name: String,
        url: String,
        status: u16,
    },

    #[error("Failed to write {file_name} to {}: {message}", .path.display())]
    Write {
        file_name: String,
        path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("Failed to parse release index from {url}: {details}")]
    IndexParse { url: String, details: String },
}

impl DownloadError {
    pub fn request(file_name: &str, url: &str, details: impl Into<String>) -> Self {
        Self::Request {
            file_name: file_name.to_string(),
            url: url.to_string(),
            details: details.into(),
        }
    }

    #[must_use]
    pub fn write(file_name: &str, path: &Path, source: &std::io::Error) -> Self {
        Self::Write {
            file_name: file_name.to_string(),
            path: path.to_path_buf(),
            kind: source.kind(),
            message: source.to_string(),
        }
    }

    /// Name of the file the failed download was attempting to fetch.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::Request { file_name, .. }
            | Self::Status { file_name, .. }
            | Self::Write { file_name, .. } => file_name,
            Self::IndexParse { .. } => "index.json",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to extract {}: {context}: {details}", .archive.display())]
pub struct ExtractError {
    pub archive: PathBuf,
    pub context: &'static str,
    pub details: String,
}

impl ExtractError {
    pub fn new(archive: &Path, context: &'static str, details: impl std::fmt::Display) -> Self {
        Self {
            archive: archive.to_path_buf(),
            context,
            details: details.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to {action} {}: {message}", .path.display())]
pub struct PlacementError {
    pub action: &'static str,
    pub path: PathBuf,
    pub kind: std::io::ErrorKind,
    pub message: String,
}

impl PlacementError {
    #[must_use]
    pub fn io(action: &'static str, path: &Path, source: &std::io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            kind: source.kind(),
            message: source.to_string(),
        }
    }
}

/// Terminal failure of one install invocation. Nothing is retried and
/// nothing already written is rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("Unsupported archive format: {file_name}")]
    UnsupportedFormat { file_name: String },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn resolution_errors_echo_offending_input() {
        let error = ResolutionError::VersionNotFound {
            input: "abc".to_string(),
            reason: "unexpected character".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Version not found: abc (unexpected character)"
        );

        let alias = ResolutionError::AliasNotSupported {
            alias: "system".to_string(),
        };
        assert_eq!(alias.to_string(), "Alias 'system' is not yet supported");
    }

    #[test]
    fn download_errors_identify_file_name() {
        let status = DownloadError::Status {
            file_name: "node-v1.2.3-linux-x64.tar.gz".to_string(),
            url: "https://nodejs.org/dist/v1.2.3/node-v1.2.3-linux-x64.tar.gz".to_string(),
            status: 404,
        };
        assert_eq!(status.file_name(), "node-v1.2.3-linux-x64.tar.gz");
        assert_eq!(
            status.to_string(),
            "Download of node-v1.2.3-linux-x64.tar.gz failed with HTTP 404"
        );

        let write = DownloadError::write(
            "node.zip",
            Path::new("/tmp/node.zip"),
            &std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
        );
        assert!(matches!(
            write,
            DownloadError::Write {
                kind: std::io::ErrorKind::StorageFull,
                ..
            }
        ));
        assert!(write.to_string().contains("/tmp/node.zip"));
    }

    #[test]
    fn install_error_wraps_components_transparently() {
        let placement = PlacementError::io(
            "create directory",
            Path::new("/root/v1.2.3"),
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let wrapped = InstallError::from(placement.clone());

        assert_eq!(wrapped, InstallError::Placement(placement));
        assert_eq!(
            wrapped.to_string(),
            "Failed to create directory /root/v1.2.3: denied"
        );
    }

    #[test]
    fn extract_error_includes_archive_path() {
        let error = ExtractError::new(
            &PathBuf::from("/tmp/node.tar.gz"),
            "read tar entries",
            "invalid gzip header",
        );
        assert_eq!(
            error.to_string(),
            "Failed to extract /tmp/node.tar.gz: read tar entries: invalid gzip header"
        );
    }

    #[test]
    fn unsupported_format_display() {
        let error = InstallError::UnsupportedFormat {
            file_name: "node.rar".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported archive format: node.rar");
    }
}
