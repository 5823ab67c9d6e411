//! Centralized constants for the application
//!
//! This module contains all magic numbers and configuration constants
//! used throughout the application, making them easy to find and modify.

use std::time::Duration;

// ============================================================================
// Application Info
// ============================================================================

/// Application name displayed in the title line
pub const DISPLAY_NAME: &str = "WatchProc";

/// Application version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Refresh Rate
// ============================================================================

/// Default refresh interval in seconds
pub const DEFAULT_INTERVAL_SECS: f64 = 5.0;

/// Idle wait between keyboard polls
pub const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Capacity of the key command channel
pub const KEY_CHANNEL_CAPACITY: usize = 16;

// ============================================================================
// Terminal
// ============================================================================

/// Column count used when the terminal size cannot be queried
pub const FALLBACK_COLUMNS: u16 = 80;

/// Row count used when the terminal size cannot be queried
pub const FALLBACK_ROWS: u16 = 24;

// ============================================================================
// Column Layout
// ============================================================================

/// Width of every fixed column plus all separators:
/// PID(8) CPU%(8) MEM%(8) MEM(10) UPTIME(8) STATUS(8) and 11 spaces
pub const FIXED_OVERHEAD: usize = 59;

/// Bounds of the NAME column
pub const MIN_NAME_WIDTH: usize = 12;
pub const MAX_NAME_WIDTH: usize = 30;

/// Bounds of the CREATED column
pub const MIN_CREATED_WIDTH: usize = 10;
pub const MAX_CREATED_WIDTH: usize = 20;

/// Lower bound of the USER column (it takes whatever is left)
pub const MIN_USER_WIDTH: usize = 8;

/// Share of the variable width offered to NAME and CREATED, in percent
pub const NAME_SHARE_PERCENT: usize = 45;
pub const CREATED_SHARE_PERCENT: usize = 30;

/// Smallest total width the table is laid out for
pub const MIN_TOTAL_WIDTH: usize =
    FIXED_OVERHEAD + MIN_NAME_WIDTH + MIN_CREATED_WIDTH + MIN_USER_WIDTH;

/// Widths of the fixed columns
pub const PID_WIDTH: usize = 8;
pub const PERCENT_WIDTH: usize = 7;
pub const MEM_WIDTH: usize = 10;
pub const UPTIME_WIDTH: usize = 8;
pub const STATUS_WIDTH: usize = 8;

// ============================================================================
// Byte Size Conversions
// ============================================================================

/// Bytes in a kilobyte
pub const BYTES_PER_KB: u64 = 1024;

/// Bytes in a megabyte
pub const BYTES_PER_MB: u64 = BYTES_PER_KB * 1024;

/// Bytes in a gigabyte
pub const BYTES_PER_GB: u64 = BYTES_PER_MB * 1024;

// ============================================================================
// Process Status
// ============================================================================

/// CPU percentage above which a process counts as active
pub const ACTIVE_CPU_THRESHOLD: f64 = 0.1;

// ============================================================================
// Usage Thresholds (for coloring)
// ============================================================================

/// CPU usage thresholds: strong / medium / mild emphasis
pub const CPU_THRESHOLD_STRONG: f64 = 50.0;
pub const CPU_THRESHOLD_MEDIUM: f64 = 20.0;
pub const CPU_THRESHOLD_MILD: f64 = 5.0;

/// Memory usage thresholds: strong / medium / mild emphasis
pub const MEM_THRESHOLD_STRONG: f64 = 10.0;
pub const MEM_THRESHOLD_MEDIUM: f64 = 5.0;
pub const MEM_THRESHOLD_MILD: f64 = 1.0;

// ============================================================================
// Text
// ============================================================================

/// Placeholder for values that could not be read
pub const PLACEHOLDER: &str = "-";

/// Key hints shown under the live table
pub const FOOTER_HINT: &str = "p:pause  q:quit";

/// Key hints shown next to the paused banner
pub const PAUSED_HINT: &str = "p:resume  q:quit";

/// Line printed once teardown completes
pub const TERMINATED_MESSAGE: &str = "WatchProc terminated.";
