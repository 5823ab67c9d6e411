//! Terminal capability provider
//!
//! The engine only talks to the terminal through [`Console`]: a byte sink
//! plus the handful of mode, size and cursor operations it needs. The
//! crossterm-backed implementation delegates OS-specific console state to
//! a per-platform module selected at build time.

#[cfg(not(windows))]
mod unix;
#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
use unix::PlatformConsole;
#[cfg(windows)]
use win32::PlatformConsole;

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    style::{Attribute, ResetColor, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};

use crate::constants::{FALLBACK_COLUMNS, FALLBACK_ROWS};

use super::error::{TerminalError, TerminalResult};

/// Terminal capabilities used by the display engine.
///
/// Cursor and clearing operations are queued on the sink; callers flush.
pub trait Console: Write + Send {
    /// Switches input to raw mode, saving the previous mode.
    fn enable_raw_mode(&mut self) -> TerminalResult<()>;

    /// Restores the input and console mode saved by `enable_raw_mode`.
    fn restore_mode(&mut self) -> TerminalResult<()>;

    /// Current `(columns, rows)`, or the fallback size when unknown.
    fn query_size(&self) -> (u16, u16);

    fn enter_alternate_screen(&mut self) -> io::Result<()> {
        self.queue(EnterAlternateScreen)?;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> io::Result<()> {
        self.queue(LeaveAlternateScreen)?;
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn move_cursor_home(&mut self) -> io::Result<()> {
        self.queue(MoveTo(0, 0))?;
        Ok(())
    }

    fn clear_to_end(&mut self) -> io::Result<()> {
        self.queue(Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.queue(Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    fn reset_style(&mut self) -> io::Result<()> {
        self.queue(SetAttribute(Attribute::Reset))?;
        self.queue(ResetColor)?;
        Ok(())
    }
}

/// Applies the fallback for a failed or degenerate size query.
pub fn size_or_fallback(size: io::Result<(u16, u16)>) -> (u16, u16) {
    match size {
        Ok((0, _)) | Err(_) => (FALLBACK_COLUMNS, FALLBACK_ROWS),
        Ok((cols, 0)) => (cols, FALLBACK_ROWS),
        Ok(size) => size,
    }
}

/// Console backed by crossterm, writing to `W` (stdout in production).
pub struct CrosstermConsole<W: Write + Send> {
    out: W,
    platform: PlatformConsole,
    raw_enabled: bool,
}

impl CrosstermConsole<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> CrosstermConsole<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            platform: PlatformConsole::default(),
            raw_enabled: false,
        }
    }

    #[cfg(test)]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write + Send> Write for CrosstermConsole<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write + Send> Console for CrosstermConsole<W> {
    fn enable_raw_mode(&mut self) -> TerminalResult<()> {
        self.platform.setup()?;
        terminal::enable_raw_mode().map_err(TerminalError::RawMode)?;
        self.raw_enabled = true;
        Ok(())
    }

    fn restore_mode(&mut self) -> TerminalResult<()> {
        // Both steps run even if the first one fails.
        let raw = if self.raw_enabled {
            self.raw_enabled = false;
            terminal::disable_raw_mode().map_err(TerminalError::RawMode)
        } else {
            Ok(())
        };
        let platform = self.platform.restore();
        raw.and(platform)
    }

    fn query_size(&self) -> (u16, u16) {
        size_or_fallback(terminal::size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_fallback() {
        assert_eq!(size_or_fallback(Ok((120, 40))), (120, 40));
        assert_eq!(size_or_fallback(Ok((0, 40))), (80, 24));
        assert_eq!(size_or_fallback(Ok((100, 0))), (100, 24));
        assert_eq!(
            size_or_fallback(Err(io::Error::new(io::ErrorKind::Other, "not a tty"))),
            (80, 24)
        );
    }

    #[test]
    fn test_cursor_primitives_emit_escape_sequences() {
        let mut console = CrosstermConsole::new(Vec::new());
        console.clear_screen().unwrap();
        console.move_cursor_home().unwrap();
        console.clear_to_end().unwrap();
        console.clear_line().unwrap();
        let text = String::from_utf8(console.out).unwrap();
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("\x1b[1;1H"));
        assert!(text.contains("\x1b[J"));
        assert!(text.contains("\x1b[K"));
    }

    #[test]
    fn test_restore_without_raw_is_noop() {
        let mut console = CrosstermConsole::new(Vec::new());
        assert!(console.restore_mode().is_ok());
    }
}
