//! Exactly-once teardown
//!
//! Quit keys, signals and fatal startup errors all funnel into
//! [`Session::terminate`]. The first caller wins the latch and restores the
//! terminal; every later caller returns immediately.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use crossterm::{queue, style::Print};
use tracing::{info, warn};

use crate::constants::TERMINATED_MESSAGE;
use crate::system::Console;
use crate::ui::{render_static, Layout};

use super::session::Session;
use super::state::{lock, SessionState};
use super::Snapshot;

/// One-shot flag deciding which caller performs teardown
#[derive(Debug, Default)]
pub struct ShutdownLatch {
    fired: AtomicBool,
}

impl ShutdownLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for exactly one caller.
    pub fn try_begin(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl<C: Console> Session<C> {
    /// Restores the terminal and wakes whoever awaits [`Session::terminated`].
    ///
    /// Steps run in order, each attempted even if an earlier one failed:
    /// restore input mode, reset styling, leave the alternate screen and
    /// print the last snapshot (skipped when paused, the table is already
    /// on screen), then print the termination message.
    pub fn terminate(&self, reason: &str) {
        if !self.latch.try_begin() {
            return;
        }
        info!(reason, "terminating");

        let mut console = lock(&self.console);
        let mut state = lock(&self.state);
        let previous = state.begin_termination();
        let snapshot = Arc::clone(&state.snapshot);
        drop(state);

        if let Err(err) = console.restore_mode() {
            warn!(error = %err, "failed to restore terminal mode");
        }
        if let Err(err) = console.reset_style() {
            warn!(error = %err, "failed to reset terminal style");
        }
        if previous != Some(SessionState::Paused) {
            if let Err(err) = self.print_final(&mut *console, &snapshot) {
                warn!(error = %err, "failed to print final snapshot");
            }
        }
        let out = &mut *console;
        let farewell = queue!(out, Print(TERMINATED_MESSAGE), Print("\r\n")).and_then(|()| out.flush());
        if let Err(err) = farewell {
            warn!(error = %err, "failed to print termination message");
        }
        drop(console);

        self.finished.notify_one();
    }

    pub fn is_terminated(&self) -> bool {
        self.latch.is_fired()
    }

    fn print_final(&self, console: &mut C, snapshot: &Snapshot) -> io::Result<()> {
        let (columns, _) = console.query_size();
        console.leave_alternate_screen()?;
        render_static(
            console,
            snapshot,
            &Layout::for_width(columns),
            &self.title_info(snapshot.len()),
            self.options.show_headers,
            Local::now(),
        )
    }
}
