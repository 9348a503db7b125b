use nvmg_model::InstallError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Install(InstallError),
    InvalidConfig {
        setting: &'static str,
        details: String,
    },
    HttpClient {
        details: String,
    },
}

impl AppError {
    pub fn invalid_config(setting: &'static str, details: impl std::fmt::Display) -> Self {
        Self::InvalidConfig {
            setting,
            details: details.to_string(),
        }
    }

    pub fn http_client(details: impl std::fmt::Display) -> Self {
        Self::HttpClient {
            details: details.to_string(),
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Install(InstallError::Resolution(_)) => 2,
            Self::Install(InstallError::Download(_)) => 3,
            Self::Install(InstallError::UnsupportedFormat { .. }) => 4,
            Self::Install(InstallError::Extract(_)) => 5,
            Self::Install(InstallError::Placement(_)) => 6,
            Self::InvalidConfig { .. } | Self::HttpClient { .. } => 1,
        }
    }
}

impl From<InstallError> for AppError {
    fn from(value: InstallError) -> Self {
        Self::Install(value)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Install(error) => write!(f, "{error}"),
            Self::InvalidConfig { setting, details } => {
                write!(f, "Invalid {setting}: {details}")
            }
            Self::HttpClient { details } => {
                write!(f, "Failed to create HTTP client: {details}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use nvmg_model::{
        DownloadError, ExtractError, InstallError, PlacementError, ResolutionError,
    };

    use super::AppError;

    #[test]
    fn install_failures_map_to_distinct_exit_codes() {
        let cases = [
            (InstallError::Resolution(ResolutionError::Empty), 2),
            (
                InstallError::Download(DownloadError::Status {
                    file_name: "node-v1.2.3-linux-x64.tar.gz".to_string(),
                    url: "https://nodejs.org/dist/v1.2.3/node-v1.2.3-linux-x64.tar.gz"
                        .to_string(),
                    status: 404,
                }),
                3,
            ),
            (
                InstallError::UnsupportedFormat {
                    file_name: "node-v1.2.3.pkg".to_string(),
                },
                4,
            ),
            (
                InstallError::Extract(ExtractError::new(
                    &PathBuf::from("/tmp/node.tar.gz"),
                    "read archive",
                    "unexpected end of file",
                )),
                5,
            ),
            (
                InstallError::Placement(PlacementError {
                    action: "create directory",
                    path: PathBuf::from("/root/.nvmg/v1.2.3"),
                    kind: std::io::ErrorKind::PermissionDenied,
                    message: "denied".to_string(),
                }),
                6,
            ),
        ];

        for (error, code) in cases {
            assert_eq!(AppError::from(error).exit_code(), code);
        }
    }

    #[test]
    fn configuration_errors_exit_with_one() {
        let config = AppError::invalid_config("node_dist_mirror", "relative URL without a base");
        let client = AppError::http_client("TLS backend unavailable");

        assert_eq!(config.exit_code(), 1);
        assert_eq!(client.exit_code(), 1);
        assert_eq!(
            config.to_string(),
            "Invalid node_dist_mirror: relative URL without a base"
        );
        assert_eq!(
            client.to_string(),
            "Failed to create HTTP client: TLS backend unavailable"
        );
    }

    #[test]
    fn install_errors_display_unchanged() {
        let error = AppError::from(InstallError::Resolution(
            ResolutionError::AliasNotSupported {
                alias: "system".to_string(),
            },
        ));

        assert_eq!(
            error.to_string(),
            InstallError::Resolution(ResolutionError::AliasNotSupported {
                alias: "system".to_string()
            })
            .to_string()
        );
    }
}
