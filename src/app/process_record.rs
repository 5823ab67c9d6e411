//! Process record data structure

use chrono::{DateTime, Local};

use crate::constants::ACTIVE_CPU_THRESHOLD;

/// Coarse activity state derived from CPU usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Active,
    Idle,
}

impl ProcessStatus {
    /// Classifies a process by its CPU percentage
    pub fn from_cpu(cpu_percent: f64) -> Self {
        if cpu_percent > ACTIVE_CPU_THRESHOLD {
            ProcessStatus::Active
        } else {
            ProcessStatus::Idle
        }
    }

    /// Get display name for the status column
    pub fn name(&self) -> &'static str {
        match self {
            ProcessStatus::Active => "active",
            ProcessStatus::Idle => "idle",
        }
    }
}

/// One process as observed during a single collection cycle
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    /// Process ID
    pub pid: u32,
    /// Executable name
    pub name: String,
    /// Creation time, if the OS exposed it
    pub created: Option<DateTime<Local>>,
    /// CPU usage percentage (can exceed 100 on multi-core machines)
    pub cpu_percent: f64,
    /// Share of physical memory in percent
    pub mem_percent: f64,
    /// Resident set size in bytes
    pub rss_bytes: u64,
    /// Activity state
    pub status: ProcessStatus,
    /// Owner, possibly prefixed with a `DOMAIN\`
    pub username: String,
    /// Full command line
    pub cmdline: String,
}

impl ProcessRecord {
    /// Creates a record with the status derived from `cpu_percent`.
    pub fn new(pid: u32, name: impl Into<String>, cpu_percent: f64, mem_percent: f64) -> Self {
        Self {
            pid,
            name: name.into(),
            created: None,
            cpu_percent,
            mem_percent,
            rss_bytes: 0,
            status: ProcessStatus::from_cpu(cpu_percent),
            username: String::new(),
            cmdline: String::new(),
        }
    }

    pub fn with_created(mut self, created: DateTime<Local>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_rss(mut self, rss_bytes: u64) -> Self {
        self.rss_bytes = rss_bytes;
        self
    }

    pub fn with_user(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_cmdline(mut self, cmdline: impl Into<String>) -> Self {
        self.cmdline = cmdline.into();
        self
    }

    /// Username without any `DOMAIN\` prefix
    pub fn short_username(&self) -> &str {
        match self.username.rfind('\\') {
            Some(idx) => &self.username[idx + 1..],
            None => &self.username,
        }
    }
}
