//! `nvmg` command line entry point.

mod cli;
mod config;
mod error;
mod logging;
mod progress;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use nvmg_core::{HttpDistribution, Installer};
use nvmg_model::{InstallOutcome, ProgressSink};
use tokio::sync::mpsc;

use cli::{Cli, Command, InstallArgs};
use config::RunConfig;
use error::AppError;
use settings::Settings;

const PROGRESS_CHANNEL_CAPACITY: usize = 64;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(cli::usage_exit_code(&error));
        }
    };

    let (settings, settings_warning) = Settings::load();
    logging::init_logging(
        cli.verbose,
        settings.debug_logging,
        settings.max_log_size_bytes,
    );
    if let Some(warning) = settings_warning {
        log::warn!("{warning}");
    }

    let result = match &cli.command {
        Command::Install(args) => install(&cli, &settings, args).await,
    };

    match result {
        Ok(outcome) => {
            println!(
                "Installed {} to {}",
                outcome.version,
                outcome.path.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn install(
    cli: &Cli,
    settings: &Settings,
    args: &InstallArgs,
) -> Result<InstallOutcome, AppError> {
    let config = RunConfig::resolve(cli, settings)?;
    log::debug!("Run configuration: {config:?}");

    let distribution = HttpDistribution::new(config.timeout, config.connect_timeout)
        .map_err(AppError::http_client)?;

    let (sender, receiver) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
    let reporter = tokio::spawn(progress::report(receiver));

    let result = {
        let installer = Installer::new(distribution, config.host)
            .with_base(config.base)
            .with_temp_dir(config.temp_dir)
            .with_progress(ProgressSink::new(sender));
        installer
            .install(&args.specifier(), &config.managed_root)
            .await
    };

    // The installer owned the only sender, so the reporter drains and exits.
    let _ = reporter.await;
    result.map_err(AppError::from)
}
