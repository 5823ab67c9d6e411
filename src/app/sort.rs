//! Sorting options for the process list

use std::cmp::Ordering;

use clap::ValueEnum;

use super::ProcessRecord;

/// Sort key options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Cpu,
    Mem,
    Pid,
    Name,
    Time,
}

impl SortKey {
    /// Get display name for the sort key
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU%",
            SortKey::Mem => "MEM%",
            SortKey::Pid => "PID",
            SortKey::Name => "Name",
            SortKey::Time => "Created",
        }
    }

    /// Ascending comparison of two records under this key.
    ///
    /// Names compare case-insensitively; a missing creation time sorts first.
    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        match self {
            SortKey::Cpu => a
                .cpu_percent
                .partial_cmp(&b.cpu_percent)
                .unwrap_or(Ordering::Equal),
            SortKey::Mem => a
                .mem_percent
                .partial_cmp(&b.mem_percent)
                .unwrap_or(Ordering::Equal),
            SortKey::Pid => a.pid.cmp(&b.pid),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Time => a.created.cmp(&b.created),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Applies the direction to an ascending comparison result.
    ///
    /// Descending inverts the comparison, so equal records keep
    /// their relative order under a stable sort.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    #[cfg(test)]
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    #[test]
    fn test_name_compare_ignores_case() {
        let a = ProcessRecord::new(1, "Zsh", 0.0, 0.0);
        let b = ProcessRecord::new(2, "bash", 0.0, 0.0);
        assert_eq!(SortKey::Name.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_time_compare_missing_first() {
        let created = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let a = ProcessRecord::new(1, "a", 0.0, 0.0);
        let b = ProcessRecord::new(2, "b", 0.0, 0.0).with_created(created);
        assert_eq!(SortKey::Time.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_direction_inverts_comparison() {
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Descending.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Ascending.flip(), SortDirection::Descending);
    }
}
