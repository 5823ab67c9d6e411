//! Diagnostic log setup
//!
//! The dashboard owns the terminal, so diagnostics never go to stdout or
//! stderr. They are written to a file when `--log-file` is given and
//! discarded otherwise.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt;

use crate::system::error::{ConfigError, ConfigResult};

/// Installs the global subscriber writing to `path`, if any.
pub fn init(path: Option<&Path>, level: Level) -> ConfigResult<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| ConfigError::LogFile {
        path: path.display().to_string(),
        source,
    })?;
    fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true)
        .with_max_level(level)
        .init();
    Ok(())
}
