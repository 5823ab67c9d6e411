//! Title line, column header, footer and banner components

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::constants::{DISPLAY_NAME, FOOTER_HINT, PAUSED_HINT};

use super::layout::Layout;
use super::utils::{fit, format_elapsed, format_elapsed_short};

/// Facts summarized by the title line
#[derive(Debug, Clone, PartialEq)]
pub struct TitleInfo {
    /// Seconds since the dashboard started
    pub elapsed_secs: u64,
    /// Name filter as typed, empty for all processes
    pub pattern: String,
    /// Refresh interval in seconds
    pub interval_secs: f64,
    /// Number of processes in the snapshot
    pub count: usize,
}

/// How a piece of the title line is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    Brand,
    Value,
    Count,
}

impl Highlight {
    fn color(self) -> Option<Color> {
        match self {
            Highlight::Plain => None,
            Highlight::Brand => Some(Color::Magenta),
            Highlight::Value => Some(Color::Yellow),
            Highlight::Count => Some(Color::Green),
        }
    }
}

/// A run of title text with one highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlight: Highlight,
}

fn seg(text: impl Into<String>, highlight: Highlight) -> Segment {
    Segment {
        text: text.into(),
        highlight,
    }
}

/// Title variants from most to least detailed.
pub fn title_variants(info: &TitleInfo) -> Vec<Vec<Segment>> {
    use Highlight::{Brand, Count, Plain, Value};

    let pattern = if info.pattern.is_empty() {
        "*"
    } else {
        info.pattern.as_str()
    };
    let count = info.count.to_string();

    let sentence = |with_interval: bool, with_noun: bool| {
        let mut segments = vec![
            seg(DISPLAY_NAME, Brand),
            seg(" [", Plain),
            seg(format_elapsed(info.elapsed_secs), Value),
            seg("] | Pattern: ", Plain),
            seg(pattern, Value),
        ];
        if with_interval {
            segments.push(seg(format!(" | Interval: {:.1}s", info.interval_secs), Plain));
        }
        segments.push(seg(" | Found: ", Plain));
        segments.push(seg(count.as_str(), Count));
        if with_noun {
            segments.push(seg(" processes", Plain));
        }
        segments
    };

    let abbreviated = vec![
        seg(DISPLAY_NAME, Brand),
        seg(" [", Plain),
        seg(format_elapsed_short(info.elapsed_secs), Value),
        seg("] | P:", Plain),
        seg(pattern, Value),
        seg(" | Found: ", Plain),
        seg(count.as_str(), Count),
    ];

    let minimal = vec![
        seg(DISPLAY_NAME, Brand),
        seg(" | ", Plain),
        seg(count.as_str(), Count),
    ];

    vec![
        sentence(true, true),
        sentence(true, false),
        sentence(false, false),
        abbreviated,
        minimal,
    ]
}

/// Concatenated text of a title variant
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Picks the most detailed variant that fits `width`, else the minimal one.
pub fn select_title(info: &TitleInfo, width: usize) -> Vec<Segment> {
    let mut variants = title_variants(info);
    let fitting = variants
        .iter()
        .position(|v| plain_text(v).width() <= width)
        .unwrap_or(variants.len() - 1);
    variants.swap_remove(fitting)
}

/// Renders the title line and the dashed rule under it.
///
/// Both lines are cleared to their end, so a shorter title drawn over a
/// longer one leaves nothing behind.
pub fn render_title<W: Write>(out: &mut W, info: &TitleInfo, layout: &Layout) -> io::Result<()> {
    for segment in select_title(info, layout.total) {
        match segment.highlight.color() {
            Some(color) => queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(color),
                Print(&segment.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?,
            None => queue!(out, Print(&segment.text))?,
        }
    }
    queue!(
        out,
        Clear(ClearType::UntilNewLine),
        Print("\r\n"),
        Print("-".repeat(layout.total)),
        Clear(ClearType::UntilNewLine),
        Print("\r\n")
    )
}

/// Renders the column headers for the process table.
pub fn render_column_headers<W: Write>(out: &mut W, layout: &Layout) -> io::Result<()> {
    let header = format!(
        "{:<8} {} {:>8} {:>8}  {:<10} {} {:<8} {} {:<8}",
        "PID",
        fit("NAME", layout.name),
        "CPU%",
        "MEM%",
        "MEM",
        fit("CREATED", layout.created),
        "UPTIME",
        fit("USER", layout.user),
        "STATUS"
    );
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::White),
        Print(header),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Clear(ClearType::UntilNewLine),
        Print("\r\n")
    )
}

/// Renders the key hint footer of the live view.
pub fn render_footer<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        Print("\r\n  "),
        SetForegroundColor(Color::DarkGrey),
        Print(FOOTER_HINT),
        ResetColor
    )
}

/// Renders the banner printed under the static table while paused.
pub fn render_paused_banner<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        Print("\r\n  "),
        SetAttribute(Attribute::Bold),
        SetBackgroundColor(Color::DarkYellow),
        SetForegroundColor(Color::Black),
        Print(" PAUSED "),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("  "),
        SetForegroundColor(Color::DarkGrey),
        Print(PAUSED_HINT),
        ResetColor,
        Print("\r\n")
    )
}

/// Renders a collection failure in place of the table.
pub fn render_error_line<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::Red),
        Print(format!("Error: {}", message)),
        ResetColor
    )
}
