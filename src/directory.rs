//! Directory views over a set of records.
//!
//! The listing page shows records newest batch first, grouped under one
//! heading per batch label with an anchor for the sidebar. The update flow
//! looks a person up by programme and start year before showing their
//! entry. [`DirectoryCache`] holds the last fetched snapshot.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::record::Record;

/// Records sharing one batch label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchGroup<'a> {
    pub label: &'a str,
    pub anchor: String,
    pub records: Vec<&'a Record>,
}

impl BatchGroup<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fragment id for a batch heading: `Int. MSc. 2017-22` -> `batch-int--msc--2017-22`.
pub fn batch_anchor(label: &str) -> String {
    let slug: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("batch-{slug}")
}

/// Sort by raw batch label, descending. Equal labels keep their order.
pub fn sort_by_batch_desc(records: &mut [Record]) {
    records.sort_by(|a, b| b.batch.cmp(&a.batch));
}

pub fn sorted_by_batch_desc(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sort_by_batch_desc(&mut sorted);
    sorted
}

/// Group records by exact batch label.
///
/// Groups appear in order of their first record; records keep input order.
pub fn group_by_batch<'a, I>(records: I) -> Vec<BatchGroup<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: Vec<BatchGroup<'a>> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.label == record.batch) {
            Some(group) => group.records.push(record),
            None => groups.push(BatchGroup {
                label: &record.batch,
                anchor: batch_anchor(&record.batch),
                records: vec![record],
            }),
        }
    }
    groups
}

/// Records whose batch starts with `"<programme> <start_year>"`.
pub fn find_by_batch_prefix<'a>(
    records: &'a [Record],
    programme: &str,
    start_year: u16,
) -> Vec<&'a Record> {
    let prefix = format!("{} {}", programme.trim(), start_year);
    records
        .iter()
        .filter(|r| r.batch.starts_with(&prefix))
        .collect()
}

/// Process-local read cache of the last fetched record set.
///
/// `refresh` swaps in a whole new snapshot; readers holding an older
/// snapshot keep seeing it unchanged.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    inner: RwLock<Snapshot>,
}

#[derive(Debug, Default)]
struct Snapshot {
    records: Arc<[Record]>,
    generation: u64,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached records.
    pub fn refresh(&self, records: Vec<Record>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.records = records.into();
        inner.generation += 1;
        debug!(
            records = inner.records.len(),
            generation = inner.generation,
            "directory cache refreshed"
        );
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<[Record]> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&inner.records)
    }

    /// Number of refreshes so far.
    pub fn generation(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterQuery, apply};
    use std::fs;
    use std::path::Path;

    fn fixture() -> Vec<Record> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/students.json");
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_batch_anchor() {
        assert_eq!(batch_anchor("Int. MSc. 2017-22"), "batch-int--msc--2017-22");
        assert_eq!(batch_anchor("PhD 2020"), "batch-phd-2020");
        assert_eq!(batch_anchor("Batch of '09"), "batch-batch-of--09");
    }

    #[test]
    fn test_sort_desc_is_stable() {
        let mut records = vec![
            Record::new("A", "PhD 2019"),
            Record::new("B", "Int. MSc. 2017-22"),
            Record::new("C", "PhD 2020"),
            Record::new("D", "PhD 2019"),
        ];
        sort_by_batch_desc(&mut records);
        let order: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "D", "B"]);
    }

    #[test]
    fn test_sorted_leaves_input_alone() {
        let records = vec![Record::new("A", "MSc 2018"), Record::new("B", "PhD 2018")];
        let sorted = sorted_by_batch_desc(&records);
        assert_eq!(sorted[0].name, "B");
        assert_eq!(records[0].name, "A");
    }

    #[test]
    fn test_group_by_batch_order() {
        let records = vec![
            Record::new("A", "PhD 2020"),
            Record::new("B", "PhD 2019"),
            Record::new("C", "PhD 2020"),
        ];
        let groups = group_by_batch(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "PhD 2020");
        assert_eq!(groups[0].anchor, "batch-phd-2020");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].records[1].name, "C");
        assert_eq!(groups[1].label, "PhD 2019");
    }

    #[test]
    fn test_group_empty() {
        let groups = group_by_batch(&[] as &[Record]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_filtered_fixture() {
        let records = sorted_by_batch_desc(&fixture());
        let matched = apply(&records, &FilterQuery::new().programme("Int. MSc."));
        let groups = group_by_batch(matched);
        let labels: Vec<&str> = groups.iter().map(|g| g.label).collect();
        assert_eq!(
            labels,
            vec!["Int. MSc. 2019", "Int. MSc. 2018-23", "Int. MSc. 2017-22"]
        );
        assert_eq!(groups[2].len(), 2);
    }

    #[test]
    fn test_find_by_batch_prefix() {
        let records = fixture();
        let found = find_by_batch_prefix(&records, "Int. MSc.", 2017);
        let names: Vec<&str> = found.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ananya Mishra", "Kamal Lochan Patra"]);

        assert!(find_by_batch_prefix(&records, "PhD", 2030).is_empty());
    }

    #[test]
    fn test_cache_refresh_replaces_snapshot() {
        let cache = DirectoryCache::new();
        assert!(cache.current().is_empty());
        assert_eq!(cache.generation(), 0);

        cache.refresh(vec![Record::new("A", "PhD 2019")]);
        let old = cache.current();
        cache.refresh(vec![Record::new("B", "PhD 2020"), Record::new("C", "PhD 2021")]);

        assert_eq!(old.len(), 1);
        assert_eq!(old[0].name, "A");
        assert_eq!(cache.current().len(), 2);
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_filter_over_cache_snapshot() {
        let cache = DirectoryCache::new();
        cache.refresh(fixture());
        let snapshot = cache.current();
        let out = apply(&snapshot, &FilterQuery::new().start_year(2017));
        assert_eq!(out.len(), 3);
        assert_eq!(cache.current().len(), 7);
    }
}
