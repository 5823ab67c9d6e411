//! Task wiring
//!
//! Three tasks share one `Session`: the refresh ticker, the key command
//! dispatcher fed by the key listener thread, and the signal watcher. The
//! caller's future completes once any of them has triggered teardown.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::constants::KEY_CHANNEL_CAPACITY;
use crate::system::{Console, MetricSource};

use super::cli::Config;
use super::input::{spawn_key_listener, Command};
use super::session::Session;
use super::SnapshotRequest;

/// Runs the dashboard until quit or signal.
///
/// The terminal is only touched after this is called, so configuration
/// errors must be reported before it.
pub async fn run<C, S>(config: &Config, console: C, source: S) -> anyhow::Result<()>
where
    C: Console + 'static,
    S: MetricSource + Send + 'static,
{
    let request = config.snapshot_request();
    info!(
        pattern = request.filter.pattern(),
        sort = request.sort_key.name(),
        direction = ?request.direction,
        top = request.top_n,
        exact = request.filter.is_exact(),
        "snapshot settings"
    );

    let session = Arc::new(Session::new(console, config.render_options()));
    session.start();

    let (key_tx, key_rx) = mpsc::channel(KEY_CHANNEL_CAPACITY);
    if let Err(err) = spawn_key_listener(key_tx) {
        session.terminate("key listener failed to start");
        return Err(err).context("failed to spawn key listener");
    }

    let tasks = [
        tokio::spawn(refresh_loop(
            Arc::clone(&session),
            source,
            request,
            config.interval(),
        )),
        tokio::spawn(dispatch_keys(Arc::clone(&session), key_rx)),
        tokio::spawn(watch_signals(Arc::clone(&session))),
    ];

    session.terminated().await;
    for handle in &tasks {
        handle.abort();
    }
    Ok(())
}

/// Collects and draws on every tick, or right away after a resume.
async fn refresh_loop<C, S>(
    session: Arc<Session<C>>,
    mut source: S,
    request: SnapshotRequest,
    period: Duration,
) where
    C: Console,
    S: MetricSource,
{
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = session.refresh_requested() => ticker.reset(),
        }
        if session.is_terminated() {
            break;
        }
        if !session.is_running() {
            continue;
        }
        // sysinfo reads and terminal writes block
        task::block_in_place(|| {
            let collected = request.collect(&mut source);
            session.render_cycle(collected);
        });
    }
}

async fn dispatch_keys<C: Console>(session: Arc<Session<C>>, mut commands: mpsc::Receiver<Command>) {
    while let Some(command) = commands.recv().await {
        task::block_in_place(|| session.handle(command));
    }
}

async fn watch_signals<C: Console>(session: Arc<Session<C>>) {
    match shutdown_signal().await {
        Ok(name) => session.terminate(name),
        Err(err) => warn!(error = %err, "signal handling unavailable"),
    }
}

/// Waits for an interrupt or terminate request from the OS.
#[cfg(unix)]
async fn shutdown_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "interrupt signal"),
        _ = terminate.recv() => Ok("terminate signal"),
        _ = hangup.recv() => Ok("hangup signal"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("interrupt signal")
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::app::session::tests::FakeConsole;
    use crate::app::{NameFilter, ProcessRecord};
    use crate::system::error::CollectionResult;

    struct FixedSource(Vec<ProcessRecord>);

    impl MetricSource for FixedSource {
        fn list(&mut self, _filter: &NameFilter) -> CollectionResult<Vec<ProcessRecord>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_refresh_loop_draws_and_stops_on_terminate() {
        let session = Arc::new(Session::new(FakeConsole::new(), Default::default()));
        let source = FixedSource(vec![ProcessRecord::new(42, "ticker", 1.0, 1.0)]);
        let config = Config::parse_from(["watchproc", "-n", "0.01"]);
        let handle = tokio::spawn(refresh_loop(
            Arc::clone(&session),
            source,
            config.snapshot_request(),
            config.interval(),
        ));

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.snapshot().len(), 1);

        session.terminate("test");
        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("refresh loop exits")
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_key_commands_reach_session() {
        let session = Arc::new(Session::new(FakeConsole::new(), Default::default()));
        let (tx, rx) = mpsc::channel(KEY_CHANNEL_CAPACITY);
        let handle = tokio::spawn(dispatch_keys(Arc::clone(&session), rx));

        tx.send(Command::TogglePause).await.unwrap();
        tx.send(Command::Quit).await.unwrap();
        drop(tx);
        handle.await.unwrap();
        assert!(session.is_terminated());
    }
}
