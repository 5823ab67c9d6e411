//! Process enumeration backed by `sysinfo`
//!
//! This module provides the metric source the snapshot pipeline reads from:
//! a small trait so the engine can be driven by fakes in tests, and the
//! cross-platform implementation used by the binary.

use chrono::{DateTime, Local, TimeZone};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, Uid, UpdateKind, Users};
use tracing::debug;

use crate::app::{NameFilter, ProcessRecord};

use super::error::{CollectionError, CollectionResult};

/// Source of per-process metrics.
pub trait MetricSource {
    /// Returns the processes whose name passes `filter`.
    fn list(&mut self, filter: &NameFilter) -> CollectionResult<Vec<ProcessRecord>>;
}

/// User id to name lookup.
///
/// A uid missing from the loaded list triggers at most one reload per
/// collection cycle; unmapped uids (deleted users, container ids) then
/// resolve to an empty name until the next cycle.
struct UserNames {
    users: Users,
    reloaded: bool,
    reloads: u64,
}

impl UserNames {
    fn new() -> Self {
        Self {
            users: Users::new_with_refreshed_list(),
            reloaded: false,
            reloads: 0,
        }
    }

    /// Allows one more reload in the coming cycle.
    fn begin_cycle(&mut self) {
        self.reloaded = false;
    }

    fn resolve(&mut self, uid: &Uid) -> String {
        if let Some(user) = self.users.get_user_by_id(uid) {
            return user.name().to_string();
        }
        if self.reloaded {
            return String::new();
        }
        self.users.refresh();
        self.reloaded = true;
        self.reloads += 1;
        self.users
            .get_user_by_id(uid)
            .map(|u| u.name().to_string())
            .unwrap_or_default()
    }
}

/// Metric source reading the live process table.
pub struct SysinfoSource {
    system: System,
    users: UserNames,
}

impl SysinfoSource {
    /// Creates the source and primes CPU accounting.
    ///
    /// CPU usage is a delta between two refreshes, so a first refresh is
    /// taken here and the first `list` already reports real values.
    pub fn new() -> Self {
        let mut source = Self {
            system: System::new(),
            users: UserNames::new(),
        };
        source.refresh();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        source
    }

    fn refresh(&mut self) -> usize {
        self.system.refresh_memory();
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_user(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet),
        )
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SysinfoSource {
    fn list(&mut self, filter: &NameFilter) -> CollectionResult<Vec<ProcessRecord>> {
        let updated = self.refresh();
        if self.system.processes().is_empty() {
            return Err(CollectionError::NoProcesses);
        }
        debug!(
            updated,
            user_reloads = self.users.reloads,
            "process table refreshed"
        );
        self.users.begin_cycle();

        let total_memory = self.system.total_memory();
        let matching: Vec<_> = self
            .system
            .processes()
            .iter()
            .filter_map(|(pid, proc)| {
                let name = proc.name().to_string_lossy().into_owned();
                if !filter.matches(&name) {
                    return None;
                }
                let cmdline = proc
                    .cmd()
                    .iter()
                    .map(|s| s.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ");
                Some((
                    pid.as_u32(),
                    name,
                    proc.cpu_usage(),
                    proc.memory(),
                    proc.start_time(),
                    proc.user_id().cloned(),
                    cmdline,
                ))
            })
            .collect();

        let records = matching
            .into_iter()
            .map(|(pid, name, cpu, rss, start, uid, cmdline)| {
                let username = uid.map(|uid| self.users.resolve(&uid)).unwrap_or_default();
                let record = ProcessRecord::new(
                    pid,
                    name,
                    f64::from(cpu),
                    memory_percent(rss, total_memory),
                )
                .with_rss(rss)
                .with_user(username)
                .with_cmdline(cmdline);
                match start_time_to_local(start) {
                    Some(created) => record.with_created(created),
                    None => record,
                }
            })
            .collect();

        Ok(records)
    }
}

/// Share of total physical memory, in percent
pub fn memory_percent(rss: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        rss as f64 / total as f64 * 100.0
    }
}

/// Converts a start time in seconds since the epoch; 0 means unknown.
pub fn start_time_to_local(secs: u64) -> Option<DateTime<Local>> {
    if secs == 0 {
        return None;
    }
    let secs = i64::try_from(secs).ok()?;
    Local.timestamp_opt(secs, 0).single()
}
