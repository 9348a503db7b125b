//! Install pipeline for Node.js releases.
//!
//! This crate turns a version specifier into an installed version directory:
//! - Specifier normalization and alias resolution against the release index.
//! - Archive naming for an explicit host target.
//! - Streaming download over HTTP.
//! - Archive expansion (tar.gz, tar.xz, tar.bz2, zip) into scoped staging.
//! - Placement into `<managed root>/<version>/`.

pub mod archive;
mod download;
pub mod extract;
mod index;
mod install;
mod place;
mod resolver;

/// Archive naming and distribution base URL handling.
pub use archive::{DEFAULT_DIST_URL, DistributionBase, DistributionBaseError, describe};
/// reqwest-backed distribution transport.
pub use download::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, HttpDistribution};
/// Archive format detection and staging.
pub use extract::{ArchiveFormat, StagedArchive};
/// Alias resolution over `index.json` entries.
pub use index::resolve_alias;
/// Pipeline orchestration.
pub use install::Installer;
/// Staging-to-destination moves.
pub use place::place;
/// Specifier normalization.
pub use resolver::resolve;
