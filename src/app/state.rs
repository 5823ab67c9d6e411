//! Shared display state and the session state machine
//!
//! One `SharedDisplayState` lives behind a single mutex. The pause flag, the
//! published snapshot and the last seen terminal size change together, so
//! every reader sees them consistent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Snapshot;

/// Lifecycle of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Live view, redrawn every tick
    Running,
    /// Static table printed, ticks skip rendering
    Paused,
    /// Teardown started; absorbing
    Terminating,
}

/// State shared by the refresh, key and signal tasks
#[derive(Debug)]
pub struct SharedDisplayState {
    pub session: SessionState,
    /// Last successfully collected snapshot
    pub snapshot: Arc<Snapshot>,
    /// Terminal size seen by the last rendered frame
    pub last_size: Option<(u16, u16)>,
    /// Set on startup and resume; the next frame clears the screen
    pub needs_full_redraw: bool,
}

impl SharedDisplayState {
    pub fn new() -> Self {
        Self {
            session: SessionState::Running,
            snapshot: Arc::new(Snapshot::default()),
            last_size: None,
            needs_full_redraw: true,
        }
    }

    /// Replaces the published snapshot wholesale.
    pub fn publish(&mut self, snapshot: Snapshot) {
        self.snapshot = Arc::new(snapshot);
    }

    /// Records the terminal size for this frame.
    ///
    /// Returns true when the screen must be cleared: first frame, resume,
    /// or a size different from the previous frame's.
    pub fn begin_frame(&mut self, size: (u16, u16)) -> bool {
        let resized = self.last_size != Some(size);
        self.last_size = Some(size);
        let full = resized || self.needs_full_redraw;
        self.needs_full_redraw = false;
        full
    }

    /// Pause/resume toggle.
    ///
    /// Returns the new state, or `None` when terminating (no transition).
    pub fn toggle_pause(&mut self) -> Option<SessionState> {
        match self.session {
            SessionState::Running => {
                self.session = SessionState::Paused;
            }
            SessionState::Paused => {
                self.session = SessionState::Running;
                self.needs_full_redraw = true;
            }
            SessionState::Terminating => return None,
        }
        Some(self.session)
    }

    /// Enters `Terminating`, returning the state it was entered from.
    ///
    /// Returns `None` if already terminating.
    pub fn begin_termination(&mut self) -> Option<SessionState> {
        match self.session {
            SessionState::Terminating => None,
            previous => {
                self.session = SessionState::Terminating;
                Some(previous)
            }
        }
    }
}

impl Default for SharedDisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Locks a mutex, recovering the data if a holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
