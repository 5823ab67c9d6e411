//! Command-line argument parsing

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::constants::DEFAULT_INTERVAL_SECS;
use crate::system::error::{ConfigError, ConfigResult};

use super::session::RenderOptions;
use super::{NameFilter, SnapshotRequest, SortDirection, SortKey};

const AFTER_HELP: &str = "\
EXAMPLES:
    watchproc                     Watch every process, busiest first
    watchproc nginx               Processes whose name contains \"nginx\"
    watchproc -p sshd -e          Processes named exactly \"sshd\"
    watchproc -n 1 -s mem --top 20
                                  Top 20 by memory, refreshed every second

CONTROLS:
    p, P, space    Pause (prints a static table) / resume
    q, Q, Ctrl+C   Quit";

/// Live process dashboard
#[derive(Debug, Clone, Parser)]
#[command(name = "watchproc", version, about, after_help = AFTER_HELP)]
pub struct Config {
    /// Refresh interval in seconds
    #[arg(
        short = 'n',
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_INTERVAL_SECS,
        allow_negative_numbers = true
    )]
    pub interval: f64,

    /// Show only processes whose name contains NAME (case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    pub pattern: Option<String>,

    /// Name filter, used when --pattern is not given
    #[arg(value_name = "PATTERN")]
    pub positional_pattern: Option<String>,

    /// Match the whole process name instead of a substring
    #[arg(short, long)]
    pub exact: bool,

    /// Sort column
    #[arg(short, long, value_enum, default_value_t = SortKey::Cpu)]
    pub sort: SortKey,

    /// Sort in ascending order (default is descending)
    #[arg(short, long)]
    pub ascending: bool,

    /// Show at most N processes (0 shows all)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub top: usize,

    /// Hide the title line and column headers
    #[arg(long)]
    pub no_header: bool,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Diagnostic level for --log-file
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Config {
    /// Rejects settings that cannot run, before the terminal is touched.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(ConfigError::InvalidInterval(self.interval));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }

    /// Effective name pattern: `--pattern` wins over the positional one.
    pub fn pattern(&self) -> &str {
        self.pattern
            .as_deref()
            .or(self.positional_pattern.as_deref())
            .unwrap_or_default()
    }

    pub fn direction(&self) -> SortDirection {
        if self.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn snapshot_request(&self) -> SnapshotRequest {
        SnapshotRequest {
            filter: NameFilter::new(self.pattern(), self.exact),
            sort_key: self.sort,
            direction: self.direction(),
            top_n: self.top,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pattern: self.pattern().to_string(),
            interval_secs: self.interval,
            show_headers: !self.no_header,
        }
    }
}
