mod host;
mod paths;

pub use host::{HostArch, HostOs, HostTarget};
pub use paths::{AppPaths, AppPathsError, default_managed_root};
