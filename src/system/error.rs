//! Custom error types for type-safe error handling
//!
//! Each failure domain of the dashboard gets its own enum so callers can
//! decide per domain whether a failure is fatal, inline, or swallowed.

use std::io;

use thiserror::Error;

// ============================================================================
// Collection Error
// ============================================================================

/// Errors raised while reading process metrics.
///
/// A collection failure never stops the refresh loop: the previous snapshot
/// stays published and the frame shows the message inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The OS returned no processes at all
    #[error("no processes could be enumerated")]
    NoProcesses,
}

// ============================================================================
// Configuration Error
// ============================================================================

/// Errors detected while validating the configuration.
///
/// These are fatal and reported before the terminal is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Refresh interval is zero, negative, or not a number
    #[error("interval must be greater than 0 (got {0})")]
    InvalidInterval(f64),

    /// The diagnostic log file could not be created
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        /// Path given on the command line
        path: String,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// Terminal Error
// ============================================================================

/// Errors from terminal capability calls.
///
/// Mode toggling failures are best-effort: they are logged and the
/// dashboard keeps running without raw input.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Raw mode could not be enabled or disabled
    #[error("raw mode toggle failed: {0}")]
    RawMode(#[source] io::Error),

    /// The platform console mode could not be read or written
    #[cfg(windows)]
    #[error("console mode change failed: {api}")]
    ConsoleMode {
        /// Name of the failing platform call
        api: &'static str,
    },
}

// ============================================================================
// Result type aliases
// ============================================================================

/// Result type for metric collection
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for terminal capability calls
pub type TerminalResult<T> = Result<T, TerminalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_error_message() {
        assert_eq!(
            CollectionError::NoProcesses.to_string(),
            "no processes could be enumerated"
        );
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            ConfigError::InvalidInterval(-1.0).to_string(),
            "interval must be greater than 0 (got -1)"
        );
    }

    #[test]
    fn test_terminal_error_keeps_source() {
        use std::error::Error as _;

        let err = TerminalError::RawMode(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "raw mode toggle failed: boom");
        assert!(err.source().is_some());
    }
}
