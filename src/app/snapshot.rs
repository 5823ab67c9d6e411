//! Snapshot pipeline: filter, sort and truncate one metric read
//!
//! Everything here is a pure function of its inputs apart from the single
//! `MetricSource::list` call in [`SnapshotRequest::collect`].

use crate::system::error::CollectionResult;
use crate::system::processes::MetricSource;

use super::{ProcessRecord, SortDirection, SortKey};

/// Case-insensitive process name filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameFilter {
    /// Pattern as typed by the user, shown in the title line
    pattern: String,
    /// Lowercased pattern used for matching
    needle: String,
    /// Whole-name match instead of substring match
    exact: bool,
}

impl NameFilter {
    pub fn new(pattern: impl Into<String>, exact: bool) -> Self {
        let pattern = pattern.into();
        let needle = pattern.to_lowercase();
        Self {
            pattern,
            needle,
            exact,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Tests a process name against the filter.
    pub fn matches(&self, name: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        if self.exact {
            name == self.needle
        } else {
            name.contains(&self.needle)
        }
    }
}

/// One immutable, ordered set of process records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<ProcessRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        Self { records }
    }

    /// Records in display order
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Everything that shapes a snapshot besides the raw metric read
#[derive(Debug, Clone, Default)]
pub struct SnapshotRequest {
    pub filter: NameFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// Maximum number of records kept (0 = unbounded)
    pub top_n: usize,
}

impl SnapshotRequest {
    /// Reads the metric source and shapes the result into a snapshot.
    ///
    /// On failure nothing is produced; the caller keeps its previous snapshot.
    pub fn collect<S>(&self, source: &mut S) -> CollectionResult<Snapshot>
    where
        S: MetricSource + ?Sized,
    {
        let records = source.list(&self.filter)?;
        Ok(self.build(records))
    }

    /// Filters, sorts and truncates a raw record set.
    pub fn build(&self, records: Vec<ProcessRecord>) -> Snapshot {
        let mut records: Vec<ProcessRecord> = records
            .into_iter()
            .filter(|r| self.filter.matches(&r.name))
            .collect();

        let key = self.sort_key;
        let direction = self.direction;
        records.sort_by(|a, b| direction.apply(key.compare(a, b)));

        if self.top_n > 0 {
            records.truncate(self.top_n);
        }

        Snapshot::new(records)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::system::error::CollectionError;

    struct FixedSource(CollectionResult<Vec<ProcessRecord>>);

    impl MetricSource for FixedSource {
        fn list(&mut self, _filter: &NameFilter) -> CollectionResult<Vec<ProcessRecord>> {
            self.0.clone()
        }
    }

    fn sample() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new(10, "idle-daemon", 0.0, 0.4),
            ProcessRecord::new(11, "compiler", 12.3, 3.1),
            ProcessRecord::new(12, "Shell", 0.5, 0.2),
        ]
    }

    fn cpu_desc(top_n: usize) -> SnapshotRequest {
        SnapshotRequest {
            top_n,
            ..SnapshotRequest::default()
        }
    }

    fn cpus(snapshot: &Snapshot) -> Vec<f64> {
        snapshot.records().iter().map(|r| r.cpu_percent).collect()
    }

    #[test]
    fn test_cpu_descending_order() {
        let snapshot = cpu_desc(0).build(sample());
        assert_eq!(cpus(&snapshot), vec![12.3, 0.5, 0.0]);
    }

    #[test]
    fn test_top_n_keeps_first_records() {
        let snapshot = cpu_desc(2).build(sample());
        assert_eq!(cpus(&snapshot), vec![12.3, 0.5]);
    }

    #[test]
    fn test_top_n_larger_than_set() {
        let snapshot = cpu_desc(10).build(sample());
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_substring_filter_ignores_case() {
        let request = SnapshotRequest {
            filter: NameFilter::new("SHE", false),
            ..SnapshotRequest::default()
        };
        let snapshot = request.build(sample());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].pid, 12);
    }

    #[test]
    fn test_exact_filter() {
        let filter = NameFilter::new("shell", true);
        assert!(filter.matches("Shell"));
        assert!(!filter.matches("shell2"));
        assert!(NameFilter::default().matches("anything"));
    }

    #[test]
    fn test_descending_keeps_tie_order() {
        let records = vec![
            ProcessRecord::new(1, "a", 1.0, 0.0),
            ProcessRecord::new(2, "b", 1.0, 0.0),
            ProcessRecord::new(3, "c", 1.0, 0.0),
        ];
        let snapshot = cpu_desc(0).build(records);
        let pids: Vec<u32> = snapshot.records().iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![1, 2, 3]);
    }

    #[test]
    fn test_collect_propagates_error() {
        let mut source = FixedSource(Err(CollectionError::NoProcesses));
        let result = cpu_desc(0).collect(&mut source);
        assert_eq!(result, Err(CollectionError::NoProcesses));
    }

    #[test]
    fn test_collect_builds_snapshot() {
        let mut source = FixedSource(Ok(sample()));
        let snapshot = cpu_desc(1).collect(&mut source).unwrap();
        assert_eq!(snapshot.records()[0].name, "compiler");
    }

    fn arb_records() -> impl Strategy<Value = Vec<ProcessRecord>> {
        prop::collection::vec(("[a-cA-C]{1,4}", 0.0f64..400.0), 0..40).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (name, cpu))| ProcessRecord::new(i as u32, name, cpu, 0.0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_idempotent(records in arb_records(), pattern in "[a-c]{0,2}", exact: bool) {
            let request = SnapshotRequest {
                filter: NameFilter::new(pattern, exact),
                ..SnapshotRequest::default()
            };
            let once = request.build(records);
            let twice = request.build(once.records().to_vec());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_top_n_bound(records in arb_records(), top_n in 1usize..50) {
            let matched = records.len();
            let snapshot = cpu_desc(top_n).build(records);
            prop_assert_eq!(snapshot.len(), top_n.min(matched));
        }

        #[test]
        fn prop_double_inversion_round_trip(count in 0usize..40) {
            // Unique pids give a key with no ties.
            let records: Vec<ProcessRecord> = (0..count as u32)
                .rev()
                .map(|pid| ProcessRecord::new(pid, "p", 0.0, 0.0))
                .collect();
            let mut request = SnapshotRequest {
                sort_key: SortKey::Pid,
                direction: SortDirection::Ascending,
                ..SnapshotRequest::default()
            };
            let original = request.build(records);

            request.direction = request.direction.flip();
            let inverted = request.build(original.records().to_vec());
            request.direction = request.direction.flip();
            let restored = request.build(inverted.records().to_vec());

            prop_assert_eq!(original, restored);
        }
    }
}
