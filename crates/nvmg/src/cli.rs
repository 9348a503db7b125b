use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nvmg_platform::{HostArch, HostOs};

/// Download and install Node.js release binaries.
#[derive(Parser, Debug)]
#[command(
    name = "nvmg",
    version,
    about = "Install Node.js release binaries into a managed directory",
    after_help = "\
ENVIRONMENT VARIABLES:
    NVMG_DIR                 Managed root (default: ~/.nvmg)
    NVMG_NODEJS_ORG_MIRROR   Distribution server (default: https://nodejs.org/dist/)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory that holds installed versions.
    #[arg(long, global = true, env = "NVMG_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Base URL of the Node.js distribution server.
    #[arg(long, global = true, env = "NVMG_NODEJS_ORG_MIRROR", value_name = "URL")]
    pub node_dist_mirror: Option<String>,

    /// Install binaries for this operating system instead of the current one.
    #[arg(long, global = true, value_name = "OS")]
    pub os: Option<HostOs>,

    /// Install binaries for this CPU architecture instead of the current one.
    #[arg(long, global = true, value_name = "ARCH")]
    pub arch: Option<HostArch>,

    /// Where transient download and staging directories are created.
    #[arg(long, global = true, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download, unpack and place a Node.js version.
    Install(InstallArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Install the newest LTS release.
    #[arg(long, conflicts_with = "version")]
    pub lts: bool,

    /// Version or alias, e.g. 20.11.0, v18.19.0, lts/iron, latest.
    #[arg(required_unless_present = "lts")]
    pub version: Option<String>,
}

impl InstallArgs {
    pub fn specifier(&self) -> String {
        match &self.version {
            Some(version) => version.clone(),
            None => "lts/*".to_string(),
        }
    }
}

/// Exit status for a failed parse: help and version output succeed, every
/// other usage error shares the configuration status.
pub fn usage_exit_code(error: &clap::Error) -> u8 {
    u8::from(error.use_stderr())
}
