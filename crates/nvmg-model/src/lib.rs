mod error;
mod traits;
mod types;

pub use error::{DownloadError, ExtractError, InstallError, PlacementError, ResolutionError};
pub use traits::{Distribution, ProgressSink};
pub use types::{
    AliasTarget, ArchiveDescriptor, CanonicalVersion, InstallOutcome, InstallPhase,
    InstallProgress, LtsSelector, NamedAlias, ReleaseEntry, VersionSpecifier,
};
