use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    Linux,
    Darwin,
    Windows,
    Solaris,
    Other(String),
}

impl HostOs {
    /// Operating system this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Accepts both Rust (`macos`) and Go/Node (`darwin`) spellings.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "darwin" | "macos" | "osx" => Self::Darwin,
            "windows" | "win" => Self::Windows,
            "solaris" | "sunos" => Self::Solaris,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for HostOs {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Darwin => write!(f, "darwin"),
            Self::Windows => write!(f, "windows"),
            Self::Solaris => write!(f, "solaris"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostArch {
    X86,
    X64,
    Arm64,
    Ppc64,
    Ppc64le,
    S390x,
    Other(String),
}

impl HostArch {
    /// Architecture this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(all(target_arch = "powerpc64", target_endian = "little")) {
            return Self::Ppc64le;
        }
        Self::from_name(std::env::consts::ARCH)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "x86" | "386" | "i386" | "i686" | "ia32" => Self::X86,
            "x86_64" | "amd64" | "x64" => Self::X64,
            "aarch64" | "arm64" => Self::Arm64,
            "powerpc64" | "ppc64" => Self::Ppc64,
            "powerpc64le" | "ppc64le" => Self::Ppc64le,
            "s390x" => Self::S390x,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for HostArch {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86 => write!(f, "x86"),
            Self::X64 => write!(f, "x86_64"),
            Self::Arm64 => write!(f, "aarch64"),
            Self::Ppc64 => write!(f, "ppc64"),
            Self::Ppc64le => write!(f, "ppc64le"),
            Self::S390x => write!(f, "s390x"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Operating system and CPU architecture an archive is selected for.
///
/// Sourced once at startup and passed down explicitly so archive naming
/// never consults the running process.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostTarget {
    pub os: HostOs,
    pub arch: HostArch,
}

impl HostTarget {
    #[must_use]
    pub fn new(os: HostOs, arch: HostArch) -> Self {
        Self { os, arch }
    }

    #[must_use]
    pub fn current() -> Self {
        Self::new(HostOs::current(), HostArch::current())
    }

    /// The running host with either component replaced.
    #[must_use]
    pub fn with_overrides(os: Option<HostOs>, arch: Option<HostArch>) -> Self {
        let current = Self::current();
        let target = Self::new(os.unwrap_or(current.os), arch.unwrap_or(current.arch));
        log::debug!("Host target: {target}");
        target
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::{HostArch, HostOs, HostTarget};

    #[test]
    fn os_names_accept_rust_and_node_spellings() {
        assert_eq!(HostOs::from_name("macos"), HostOs::Darwin);
        assert_eq!(HostOs::from_name("darwin"), HostOs::Darwin);
        assert_eq!(HostOs::from_name("Windows"), HostOs::Windows);
        assert_eq!(HostOs::from_name("sunos"), HostOs::Solaris);
        assert_eq!(
            HostOs::from_name("freebsd"),
            HostOs::Other("freebsd".to_string())
        );
    }

    #[test]
    fn arch_names_accept_rust_and_go_spellings() {
        assert_eq!(HostArch::from_name("amd64"), HostArch::X64);
        assert_eq!(HostArch::from_name("x86_64"), HostArch::X64);
        assert_eq!(HostArch::from_name("386"), HostArch::X86);
        assert_eq!(HostArch::from_name("aarch64"), HostArch::Arm64);
        assert_eq!(HostArch::from_name("ppc64le"), HostArch::Ppc64le);
        assert_eq!(HostArch::from_name("s390x"), HostArch::S390x);
        assert_eq!(
            HostArch::from_name("riscv64"),
            HostArch::Other("riscv64".to_string())
        );
    }

    #[test]
    fn current_matches_compile_target() {
        let current = HostTarget::current();
        assert_eq!(current.os, HostOs::from_name(std::env::consts::OS));
        if cfg!(target_arch = "x86_64") {
            assert_eq!(current.arch, HostArch::X64);
        }
    }

    #[test]
    fn overrides_replace_only_given_components() {
        let target = HostTarget::with_overrides(Some(HostOs::Windows), None);
        assert_eq!(target.os, HostOs::Windows);
        assert_eq!(target.arch, HostArch::current());
    }

    #[test]
    fn display_joins_os_and_arch() {
        let target = HostTarget::new(HostOs::Linux, HostArch::Arm64);
        assert_eq!(target.to_string(), "linux/aarch64");
    }
}
