//! Terminal rendering logic

use std::io;

use chrono::{DateTime, Local};
use crossterm::{queue, style::Print};

use crate::app::Snapshot;
use crate::system::Console;

use super::components::{
    render_column_headers, render_error_line, render_footer, render_paused_banner, render_title,
    TitleInfo,
};
use super::layout::Layout;
use super::process_list::render_row;

/// What the frame shows below the headers
#[derive(Debug, Clone, Copy)]
pub enum FrameBody<'a> {
    Table(&'a Snapshot),
    Error(&'a str),
}

/// Everything needed to draw one live frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub body: FrameBody<'a>,
    pub layout: Layout,
    pub title: TitleInfo,
    /// First frame, resize or resume: wipe the whole screen first
    pub full_clear: bool,
    pub show_headers: bool,
    pub now: DateTime<Local>,
}

/// Draws a live frame over the previous one.
///
/// Instead of clearing (which flickers) the cursor goes home and every line
/// is cleared to its end after being written; rows left over from a longer
/// previous frame are wiped with a clear-to-end before the footer.
pub fn render_frame<C: Console>(console: &mut C, frame: &Frame<'_>) -> io::Result<()> {
    if frame.full_clear {
        console.clear_screen()?;
    }
    console.move_cursor_home()?;

    match frame.body {
        FrameBody::Table(snapshot) => {
            if frame.show_headers {
                render_title(console, &frame.title, &frame.layout)?;
                render_column_headers(console, &frame.layout)?;
            }
            for record in snapshot.records() {
                render_row(console, record, &frame.layout, frame.now)?;
                console.clear_line()?;
                queue!(console, Print("\r\n"))?;
            }
        }
        FrameBody::Error(message) => {
            render_error_line(console, message)?;
            console.clear_line()?;
            queue!(console, Print("\r\n"))?;
        }
    }

    console.clear_to_end()?;
    render_footer(console)?;
    console.clear_line()?;
    console.flush()
}

/// Prints a snapshot as a plain, scrollable table.
///
/// Used outside the alternate screen (pause and teardown), so nothing is
/// cleared and the output stays in the terminal's scrollback.
pub fn render_static<C: Console>(
    console: &mut C,
    snapshot: &Snapshot,
    layout: &Layout,
    title: &TitleInfo,
    show_headers: bool,
    now: DateTime<Local>,
) -> io::Result<()> {
    if show_headers {
        render_title(console, title, layout)?;
        render_column_headers(console, layout)?;
    }
    for record in snapshot.records() {
        render_row(console, record, layout, now)?;
        queue!(console, Print("\r\n"))?;
    }
    console.flush()
}

/// Prints the paused indicator under a static table.
pub fn render_paused<C: Console>(console: &mut C) -> io::Result<()> {
    render_paused_banner(console)?;
    console.flush()
}
