use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use crate::config::LoggingSettings;

/// Send `log` output to the configured file; the terminal belongs to the UI.
///
/// Returns the log file path, or `None` when logging stays off because the
/// file could not be opened.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.resolved_file()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .ok()?;
    Some(path)
}
