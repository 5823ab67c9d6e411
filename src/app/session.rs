//! Session controller
//!
//! `Session` owns the console and the shared display state. The refresh,
//! key and signal tasks hold it behind an `Arc` and call into it; every
//! terminal write happens with the console lock held, so frames, the pause
//! table and the teardown output never interleave.
//!
//! Lock order is always console, then state. The state lock is released
//! before any terminal I/O.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Local;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::system::error::CollectionResult;
use crate::system::Console;
use crate::ui::{render_frame, render_paused, render_static, Frame, FrameBody, Layout, TitleInfo};

use super::input::Command;
use super::shutdown::ShutdownLatch;
use super::state::{lock, SessionState, SharedDisplayState};
use super::Snapshot;

/// Display settings fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Name filter as typed, shown in the title
    pub pattern: String,
    pub interval_secs: f64,
    pub show_headers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            interval_secs: crate::constants::DEFAULT_INTERVAL_SECS,
            show_headers: true,
        }
    }
}

/// The running dashboard
pub struct Session<C: Console> {
    pub(super) console: Mutex<C>,
    pub(super) state: Mutex<SharedDisplayState>,
    pub(super) latch: ShutdownLatch,
    pub(super) finished: Notify,
    pub(super) options: RenderOptions,
    started: Instant,
    refresh_now: Notify,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, options: RenderOptions) -> Self {
        Self {
            console: Mutex::new(console),
            state: Mutex::new(SharedDisplayState::new()),
            latch: ShutdownLatch::new(),
            finished: Notify::new(),
            options,
            started: Instant::now(),
            refresh_now: Notify::new(),
        }
    }

    /// Puts the terminal into dashboard mode: raw input and the alternate
    /// screen. A raw mode failure is logged and the session runs cooked.
    pub fn start(&self) {
        let mut console = lock(&self.console);
        if let Err(err) = console.enable_raw_mode() {
            warn!(error = %err, "raw mode unavailable, keys need Enter");
        }
        let entered = console
            .enter_alternate_screen()
            .and_then(|()| console.flush());
        if let Err(err) = entered {
            warn!(error = %err, "failed to enter alternate screen");
        }
        info!(
            pattern = %self.options.pattern,
            interval = self.options.interval_secs,
            "session started"
        );
    }

    pub fn state(&self) -> SessionState {
        lock(&self.state).session
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    /// Resolves once teardown has finished writing to the terminal.
    pub fn terminated(&self) -> Notified<'_> {
        self.finished.notified()
    }

    /// Resolves when the refresh task should draw ahead of its next tick.
    pub fn refresh_requested(&self) -> Notified<'_> {
        self.refresh_now.notified()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&lock(&self.state).snapshot)
    }

    pub(super) fn title_info(&self, count: usize) -> TitleInfo {
        TitleInfo {
            elapsed_secs: self.started.elapsed().as_secs(),
            pattern: self.options.pattern.clone(),
            interval_secs: self.options.interval_secs,
            count,
        }
    }

    /// Publishes a collection result and draws one live frame.
    ///
    /// Does nothing unless the session is running. A failed collection
    /// keeps the previous snapshot and draws the error in its place.
    pub fn render_cycle(&self, collected: CollectionResult<Snapshot>) {
        let mut console = lock(&self.console);
        let size = console.query_size();

        let mut state = lock(&self.state);
        if state.session != SessionState::Running {
            return;
        }
        let full_clear = state.begin_frame(size);
        let (snapshot, error) = match collected {
            Ok(snapshot) => {
                if snapshot.is_empty() {
                    debug!("no process matches the filter");
                }
                state.publish(snapshot);
                (Arc::clone(&state.snapshot), None)
            }
            Err(err) => {
                warn!(error = %err, "process collection failed");
                (Arc::clone(&state.snapshot), Some(err.to_string()))
            }
        };
        drop(state);

        let body = match &error {
            Some(message) => FrameBody::Error(message),
            None => FrameBody::Table(&snapshot),
        };
        let frame = Frame {
            body,
            layout: Layout::for_width(size.0),
            title: self.title_info(snapshot.len()),
            full_clear,
            show_headers: self.options.show_headers,
            now: Local::now(),
        };
        if let Err(err) = render_frame(&mut *console, &frame) {
            warn!(error = %err, "frame render failed");
        }
    }

    /// Pauses a running session or resumes a paused one.
    ///
    /// Pausing leaves the alternate screen and prints the current snapshot
    /// as a static table under a banner. Resuming re-enters the alternate
    /// screen and asks for an immediate full redraw.
    pub fn toggle_pause(&self) {
        let mut console = lock(&self.console);
        let mut state = lock(&self.state);
        let transition = state.toggle_pause();
        let snapshot = Arc::clone(&state.snapshot);
        drop(state);

        match transition {
            Some(SessionState::Paused) => {
                info!("paused");
                if let Err(err) = self.print_paused(&mut *console, &snapshot) {
                    warn!(error = %err, "failed to print paused table");
                }
            }
            Some(SessionState::Running) => {
                info!("resumed");
                let entered = console
                    .enter_alternate_screen()
                    .and_then(|()| console.flush());
                if let Err(err) = entered {
                    warn!(error = %err, "failed to re-enter alternate screen");
                }
                drop(console);
                self.refresh_now.notify_one();
            }
            _ => debug!("pause toggle ignored during teardown"),
        }
    }

    fn print_paused(&self, console: &mut C, snapshot: &Snapshot) -> io::Result<()> {
        let (columns, _) = console.query_size();
        console.leave_alternate_screen()?;
        render_static(
            console,
            snapshot,
            &Layout::for_width(columns),
            &self.title_info(snapshot.len()),
            self.options.show_headers,
            Local::now(),
        )?;
        render_paused(console)
    }

    /// Applies a decoded key command.
    pub fn handle(&self, command: Command) {
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::Quit => self.terminate("quit key"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::app::ProcessRecord;
    use crate::system::error::{CollectionError, TerminalResult};

    /// Console that records output and counts mode changes
    #[derive(Default)]
    pub struct FakeConsole {
        pub out: Vec<u8>,
        pub size: (u16, u16),
        pub raw_enables: usize,
        pub restores: Arc<AtomicUsize>,
    }

    impl FakeConsole {
        pub fn new() -> Self {
            Self {
                size: (120, 40),
                ..Self::default()
            }
        }

        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.out).into_owned()
        }
    }

    impl Write for FakeConsole {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Console for FakeConsole {
        fn enable_raw_mode(&mut self) -> TerminalResult<()> {
            self.raw_enables += 1;
            Ok(())
        }

        fn restore_mode(&mut self) -> TerminalResult<()> {
            self.restores.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn query_size(&self) -> (u16, u16) {
            self.size
        }
    }

    pub fn session() -> Session<FakeConsole> {
        Session::new(FakeConsole::new(), RenderOptions::default())
    }

    fn snapshot(names: &[&str]) -> Snapshot {
        Snapshot::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| ProcessRecord::new(i as u32 + 1, *name, 0.0, 0.0))
                .collect(),
        )
    }

    fn take_output(session: &Session<FakeConsole>) -> String {
        let mut console = lock(&session.console);
        let text = console.text();
        console.out.clear();
        text
    }

    #[test]
    fn test_start_enters_dashboard_mode() {
        let session = session();
        session.start();
        assert_eq!(lock(&session.console).raw_enables, 1);
        assert!(take_output(&session).contains("\x1b[?1049h"));
        assert!(session.is_running());
    }

    #[test]
    fn test_render_cycle_publishes_and_draws() {
        let session = session();
        session.render_cycle(Ok(snapshot(&["alpha", "beta"])));
        assert_eq!(session.snapshot().len(), 2);
        let text = take_output(&session);
        assert!(text.contains("\x1b[2J"), "first frame clears");
        assert!(text.contains("alpha"));

        session.render_cycle(Ok(snapshot(&["gamma"])));
        let text = take_output(&session);
        assert!(!text.contains("\x1b[2J"));
        assert!(text.contains("gamma"));
    }

    #[test]
    fn test_empty_snapshot_draws_headers_only() {
        let session = session();
        session.render_cycle(Ok(snapshot(&["alpha"])));
        take_output(&session);
        session.render_cycle(Ok(Snapshot::default()));
        assert!(session.snapshot().is_empty());
        let text = take_output(&session);
        assert!(text.contains("PID"));
        assert!(!text.contains("alpha"));
        assert!(text.contains("\x1b[J"), "stale rows are wiped");
    }

    #[test]
    fn test_resize_forces_full_clear() {
        let session = session();
        session.render_cycle(Ok(snapshot(&["alpha"])));
        take_output(&session);
        lock(&session.console).size = (100, 30);
        session.render_cycle(Ok(snapshot(&["alpha"])));
        assert!(take_output(&session).contains("\x1b[2J"));
    }

    #[test]
    fn test_failed_collection_keeps_snapshot() {
        let session = session();
        session.render_cycle(Ok(snapshot(&["alpha"])));
        take_output(&session);
        session.render_cycle(Err(CollectionError::NoProcesses));
        assert_eq!(session.snapshot().len(), 1);
        let text = take_output(&session);
        assert!(text.contains("Error: no processes could be enumerated"));
        assert!(!text.contains("alpha"));
    }

    #[test]
    fn test_pause_prints_static_table_and_skips_frames() {
        let session = session();
        session.render_cycle(Ok(snapshot(&["alpha"])));
        take_output(&session);

        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        let text = take_output(&session);
        assert!(text.contains("\x1b[?1049l"));
        assert!(text.contains("alpha"));
        assert!(text.contains("PAUSED"));

        session.render_cycle(Ok(snapshot(&["beta"])));
        assert!(take_output(&session).is_empty());
        assert_eq!(session.snapshot().records()[0].name, "alpha");
    }

    #[test]
    fn test_resume_redraws_fully() {
        let session = session();
        session.render_cycle(Ok(snapshot(&["alpha"])));
        session.toggle_pause();
        session.toggle_pause();
        assert!(session.is_running());
        take_output(&session);

        session.render_cycle(Ok(snapshot(&["alpha"])));
        assert!(take_output(&session).contains("\x1b[2J"));
    }

    #[test]
    fn test_handle_dispatches_commands() {
        let session = session();
        session.handle(Command::TogglePause);
        assert_eq!(session.state(), SessionState::Paused);
        session.handle(Command::Quit);
        assert_eq!(session.state(), SessionState::Terminating);
        session.handle(Command::TogglePause);
        assert_eq!(session.state(), SessionState::Terminating);
    }

    #[test]
    fn test_concurrent_render_and_pause_never_interleave() {
        let session = Arc::new(session());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    for _ in 0..25 {
                        if i % 2 == 0 {
                            session.render_cycle(Ok(snapshot(&["alpha", "beta"])));
                        } else {
                            session.toggle_pause();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let text = lock(&session.console).text();
        // a live frame never lands between leaving the alternate screen
        // and the paused banner
        for chunk in text.split("\x1b[?1049l").skip(1) {
            let table = chunk.split("PAUSED").next().unwrap_or_default();
            assert!(!table.contains("\x1b[1;1H"));
            assert!(chunk.contains("PAUSED"));
        }
        assert_ne!(session.state(), SessionState::Terminating);
    }
}
