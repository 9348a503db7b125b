use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;

use nvmg_platform::AppPaths;

fn trim_log_file_if_oversized(log_path: &Path, max_log_size: u64) {
    if let Ok(metadata) = std::fs::metadata(log_path)
        && metadata.len() > max_log_size
        && let Ok(contents) = std::fs::read(log_path)
    {
        let half = contents.len() / 2;
        let keep_from = contents[half..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(half, |pos| half + pos + 1);
        let _ = std::fs::write(log_path, &contents[keep_from..]);
    }
}

fn terminal_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Terminal logs go to stderr; the debug log file is only written when
/// `file_logging` is set.
pub fn init_logging(verbose: bool, file_logging: bool, max_log_size: u64) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("nvmg")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        terminal_level(verbose),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let mut log_path = None;
    if file_logging && let Ok(paths) = AppPaths::new() {
        let _ = paths.ensure_dirs();
        let path = paths.log_file();
        trim_log_file_if_oversized(&path, max_log_size);

        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
            loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
            log_path = Some(path);
        }
    }

    let _ = CombinedLogger::init(loggers);

    if let Some(path) = log_path {
        log::debug!("Debug log file: {}", path.display());
    }
}
