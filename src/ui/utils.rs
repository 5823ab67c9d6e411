//! Utility functions for UI rendering

use chrono::{DateTime, Datelike, Local};
use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::constants::{
    BYTES_PER_GB, BYTES_PER_KB, BYTES_PER_MB, CPU_THRESHOLD_MEDIUM, CPU_THRESHOLD_MILD,
    CPU_THRESHOLD_STRONG, MEM_THRESHOLD_MEDIUM, MEM_THRESHOLD_MILD, MEM_THRESHOLD_STRONG,
    PLACEHOLDER,
};

/// Truncates a string to fit within a given display width.
///
/// If the string is wider than `max_width`, it is cut and "..." is appended.
/// Width is measured in terminal cells, so wide characters count twice.
#[must_use]
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let (budget, suffix) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(suffix);
    out
}

/// Truncates and left-aligns a string into exactly `width` cells.
#[must_use]
pub fn fit(s: &str, width: usize) -> String {
    let cut = truncate_string(s, width);
    let pad = width.saturating_sub(cut.width());
    format!("{}{:pad$}", cut, "", pad = pad)
}

/// Formats a byte count with a binary-prefix suffix.
///
/// Uses the largest unit in which the value is at least 1:
/// `0B`, `512B`, `1.5K`, `1.0M`, `1.0G`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= BYTES_PER_GB {
        format!("{:.1}G", bytes as f64 / BYTES_PER_GB as f64)
    } else if bytes >= BYTES_PER_MB {
        format!("{:.1}M", bytes as f64 / BYTES_PER_MB as f64)
    } else if bytes >= BYTES_PER_KB {
        format!("{:.1}K", bytes as f64 / BYTES_PER_KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Formats how long a process has been running.
///
/// Shows the largest non-zero unit pair: "2d5h", "1h30m", "7m", "42s".
#[must_use]
pub fn format_uptime(created: Option<DateTime<Local>>, now: DateTime<Local>) -> String {
    let Some(created) = created else {
        return PLACEHOLDER.to_string();
    };
    let seconds = (now - created).num_seconds().max(0);
    let days = seconds / 86_400;
    let hours = (seconds / 3_600) % 24;
    let minutes = (seconds / 60) % 60;

    if days > 0 {
        format!("{}d{}h", days, hours)
    } else if hours > 0 {
        format!("{}h{}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

/// Formats a creation time: "MM-DD HH:MM" this year, "YY-MM-DD HH:MM" otherwise.
#[must_use]
pub fn format_created(created: Option<DateTime<Local>>, now: DateTime<Local>) -> String {
    match created {
        None => PLACEHOLDER.to_string(),
        Some(t) if t.year() == now.year() => t.format("%m-%d %H:%M").to_string(),
        Some(t) => t.format("%y-%m-%d %H:%M").to_string(),
    }
}

/// Formats the dashboard's own running time: "1h02m03s", "2m05s", "7s".
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3_600;
    let m = (seconds / 60) % 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}h{:02}m{:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m{:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Short running time for narrow titles: "1h02m", "2m05s", "7s".
#[must_use]
pub fn format_elapsed_short(seconds: u64) -> String {
    let h = seconds / 3_600;
    let m = (seconds / 60) % 60;
    if h > 0 {
        format!("{}h{:02}m", h, m)
    } else {
        format_elapsed(seconds)
    }
}

/// Display emphasis tier for a usage value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    None,
    Mild,
    Medium,
    Strong,
}

impl Emphasis {
    fn from_thresholds(value: f64, strong: f64, medium: f64, mild: f64) -> Self {
        if value > strong {
            Emphasis::Strong
        } else if value > medium {
            Emphasis::Medium
        } else if value > mild {
            Emphasis::Mild
        } else {
            Emphasis::None
        }
    }

    /// Returns the foreground color for this tier, if any.
    ///
    /// # Color Mapping
    /// * Red - Strong
    /// * Yellow - Medium
    /// * Green - Mild
    pub fn color(self) -> Option<Color> {
        match self {
            Emphasis::Strong => Some(Color::Red),
            Emphasis::Medium => Some(Color::Yellow),
            Emphasis::Mild => Some(Color::Green),
            Emphasis::None => None,
        }
    }
}

/// Emphasis tier for a CPU percentage (>50 strong, >20 medium, >5 mild)
#[must_use]
pub fn cpu_emphasis(percent: f64) -> Emphasis {
    Emphasis::from_thresholds(
        percent,
        CPU_THRESHOLD_STRONG,
        CPU_THRESHOLD_MEDIUM,
        CPU_THRESHOLD_MILD,
    )
}

/// Emphasis tier for a memory percentage (>10 strong, >5 medium, >1 mild)
#[must_use]
pub fn mem_emphasis(percent: f64) -> Emphasis {
    Emphasis::from_thresholds(
        percent,
        MEM_THRESHOLD_STRONG,
        MEM_THRESHOLD_MEDIUM,
        MEM_THRESHOLD_MILD,
    )
}
