//! Windows console mode handling using Win32 APIs
//!
//! Enables virtual-terminal processing on the output handle so ANSI escape
//! sequences render, and restores the exact original mode on teardown.

use windows::Win32::System::Console::{
    GetConsoleMode, GetStdHandle, SetConsoleMode, CONSOLE_MODE,
    ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
};

use crate::system::error::{TerminalError, TerminalResult};

/// Saved console state
#[derive(Debug, Default)]
pub struct PlatformConsole {
    /// Output mode before `setup`, if it could be read
    original_mode: Option<u32>,
}

impl PlatformConsole {
    pub fn setup(&mut self) -> TerminalResult<()> {
        // SAFETY: GetStdHandle has no preconditions.
        let handle = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) }
            .map_err(|_| TerminalError::ConsoleMode { api: "GetStdHandle" })?;

        let mut mode = CONSOLE_MODE::default();
        // SAFETY: handle comes from GetStdHandle and mode is a valid out-pointer.
        unsafe { GetConsoleMode(handle, &mut mode) }
            .map_err(|_| TerminalError::ConsoleMode { api: "GetConsoleMode" })?;
        self.original_mode = Some(mode.0);

        // SAFETY: same handle, mode derived from the current one.
        unsafe { SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) }
            .map_err(|_| TerminalError::ConsoleMode { api: "SetConsoleMode" })
    }

    pub fn restore(&mut self) -> TerminalResult<()> {
        let Some(original) = self.original_mode.take() else {
            return Ok(());
        };
        // SAFETY: GetStdHandle has no preconditions.
        let handle = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) }
            .map_err(|_| TerminalError::ConsoleMode { api: "GetStdHandle" })?;
        // SAFETY: restores a mode previously read from this handle.
        unsafe { SetConsoleMode(handle, CONSOLE_MODE(original)) }
            .map_err(|_| TerminalError::ConsoleMode { api: "SetConsoleMode" })
    }
}
