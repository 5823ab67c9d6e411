//! Unix console mode handling
//!
//! Unix terminals interpret ANSI escape sequences natively, and raw mode
//! itself is saved and restored by crossterm, so there is no extra
//! console state to manage here.

use crate::system::error::TerminalResult;

/// Saved console state (nothing to save on Unix)
#[derive(Debug, Default)]
pub struct PlatformConsole;

impl PlatformConsole {
    pub fn setup(&mut self) -> TerminalResult<()> {
        Ok(())
    }

    pub fn restore(&mut self) -> TerminalResult<()> {
        Ok(())
    }
}
