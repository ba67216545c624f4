use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Sends tracing output to the configured log file.
///
/// Stdout belongs to the alternate screen while the UI runs, so nothing may be
/// written there.
pub fn init(config: &AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_file).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finboard_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
