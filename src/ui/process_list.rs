//! Process row rendering

use std::io::{self, Write};

use chrono::{DateTime, Local};
use crossterm::{
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::app::ProcessRecord;
use crate::constants::{MEM_WIDTH, PERCENT_WIDTH, PID_WIDTH, STATUS_WIDTH, UPTIME_WIDTH};

use super::layout::Layout;
use super::utils::{
    cpu_emphasis, fit, format_bytes, format_created, format_uptime, mem_emphasis, Emphasis,
};

/// Prints `text` in the color of `emphasis`, bold when emphasized.
fn print_emphasized<W: Write>(out: &mut W, text: String, emphasis: Emphasis) -> io::Result<()> {
    match emphasis.color() {
        Some(color) => queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(color),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        ),
        None => queue!(out, Print(text)),
    }
}

/// Renders one process row without a line terminator.
///
/// Columns: PID, NAME, CPU%, MEM%, MEM, CREATED, UPTIME, USER, STATUS.
/// Text columns are left-aligned and cut to the layout, numbers are
/// right-aligned, and the two percentages are colored by usage tier.
pub fn render_row<W: Write>(
    out: &mut W,
    record: &ProcessRecord,
    layout: &Layout,
    now: DateTime<Local>,
) -> io::Result<()> {
    queue!(
        out,
        Print(format!(
            "{:<pid_w$} {} ",
            record.pid,
            fit(&record.name, layout.name),
            pid_w = PID_WIDTH
        ))
    )?;
    print_emphasized(
        out,
        format!("{:>w$.1}%", record.cpu_percent, w = PERCENT_WIDTH),
        cpu_emphasis(record.cpu_percent),
    )?;
    queue!(out, Print(" "))?;
    print_emphasized(
        out,
        format!("{:>w$.2}%", record.mem_percent, w = PERCENT_WIDTH),
        mem_emphasis(record.mem_percent),
    )?;
    queue!(
        out,
        Print(format!(
            "  {:<mem_w$} {} {:<up_w$} {} {:<st_w$}",
            format_bytes(record.rss_bytes),
            fit(&format_created(record.created, now), layout.created),
            format_uptime(record.created, now),
            fit(record.short_username(), layout.user),
            record.status.name(),
            mem_w = MEM_WIDTH,
            up_w = UPTIME_WIDTH,
            st_w = STATUS_WIDTH
        ))
    )
}
