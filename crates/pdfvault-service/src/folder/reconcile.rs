//! Remote listing vs cached listing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use pdfvault_entity::folder::FolderRecord;

/// Counts produced by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Remote folders not present in the cache.
    pub added: usize,
    /// Remote folders whose name or parent changed.
    pub updated: usize,
    /// Cached folders missing from the remote listing.
    ///
    /// This is a difference against the local cache only; it does not
    /// mean the folder was deleted upstream.
    pub removed: usize,
    /// Remote folders processed.
    pub total: usize,
}

impl SyncSummary {
    /// Remote folders that did not change.
    pub fn unchanged(&self) -> usize {
        self.total - self.added - self.updated
    }

    /// Whether anything differs from the cache.
    pub fn has_changes(&self) -> bool {
        self.added + self.updated + self.removed > 0
    }
}

/// Full result of a reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Counts.
    pub summary: SyncSummary,
    /// Ids counted as added, in remote order.
    pub added_ids: Vec<String>,
    /// Ids counted as updated, in remote order.
    pub updated_ids: Vec<String>,
    /// Ids counted as removed, in cache order.
    pub removed_ids: Vec<String>,
    /// The cache to persist: the remote listing as processed.
    pub next_cache: Vec<FolderRecord>,
}

/// Compare `remote` against `cached`.
///
/// Records with an empty id, and later duplicates of a remote id, are
/// skipped and not counted. The next cache replaces the old one wholesale.
pub fn reconcile(remote: &[FolderRecord], cached: &[FolderRecord]) -> Reconciliation {
    let index: HashMap<&str, &FolderRecord> = cached
        .iter()
        .filter(|r| !r.id.is_empty())
        .map(|r| (r.id.as_str(), r))
        .collect();

    let mut result = Reconciliation::default();
    let mut seen: HashSet<&str> = HashSet::with_capacity(remote.len());

    for record in remote {
        if record.id.is_empty() {
            warn!(name = %record.name, "Skipping remote folder with an empty id");
            continue;
        }
        if !seen.insert(record.id.as_str()) {
            warn!(id = %record.id, "Skipping duplicate remote folder");
            continue;
        }

        match index.get(record.id.as_str()) {
            None => result.added_ids.push(record.id.clone()),
            Some(previous)
                if previous.name != record.name || previous.parent_id != record.parent_id =>
            {
                result.updated_ids.push(record.id.clone())
            }
            Some(_) => {}
        }
        result.next_cache.push(record.clone());
    }

    let mut removed_seen = HashSet::new();
    result.removed_ids = cached
        .iter()
        .map(|r| r.id.as_str())
        .filter(|id| !id.is_empty() && !seen.contains(id) && removed_seen.insert(*id))
        .map(str::to_string)
        .collect();

    result.summary = SyncSummary {
        added: result.added_ids.len(),
        updated: result.updated_ids.len(),
        removed: result.removed_ids.len(),
        total: result.next_cache.len(),
    };
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str, parent: Option<&str>) -> FolderRecord {
        FolderRecord::new(id, name, parent)
    }

    #[test]
    fn test_one_new_folder() {
        let cached = vec![folder("1", "Math", None)];
        let remote = vec![folder("1", "Math", None), folder("2", "CS", None)];
        let result = reconcile(&remote, &cached);
        assert_eq!(
            result.summary,
            SyncSummary {
                added: 1,
                updated: 0,
                removed: 0,
                total: 2
            }
        );
        assert_eq!(result.added_ids, vec!["2"]);
        assert_eq!(result.next_cache, remote);
    }

    #[test]
    fn test_identical_sets() {
        let set = vec![
            folder("a", "Sem 1", None),
            folder("b", "Maths", Some("a")),
            folder("c", "Physics", Some("a")),
        ];
        let result = reconcile(&set, &set);
        assert_eq!(result.summary.added, 0);
        assert_eq!(result.summary.updated, 0);
        assert_eq!(result.summary.removed, 0);
        assert_eq!(result.summary.total, 3);
        assert!(!result.summary.has_changes());
    }

    #[test]
    fn test_rename_move_and_removal() {
        let cached = vec![
            folder("a", "Sem 1", None),
            folder("b", "Maths", Some("a")),
            folder("c", "Physics", Some("a")),
            folder("d", "Old", None),
        ];
        let remote = vec![
            folder("a", "Semester 1", None),
            folder("b", "Maths", None),
            folder("c", "Physics", Some("a")),
            folder("e", "New", Some("a")),
        ];
        let result = reconcile(&remote, &cached);
        assert_eq!(result.updated_ids, vec!["a", "b"]);
        assert_eq!(result.added_ids, vec!["e"]);
        assert_eq!(result.removed_ids, vec!["d"]);
        assert_eq!(result.summary.unchanged(), 1);
    }

    #[test]
    fn test_counts_add_up() {
        let cached: Vec<FolderRecord> = (0..20)
            .map(|i| folder(&format!("f{i}"), &format!("n{i}"), None))
            .collect();
        for shift in 0..10 {
            let remote: Vec<FolderRecord> = (shift..20 + shift)
                .map(|i| {
                    let name = if i % 4 == 0 { format!("renamed{i}") } else { format!("n{i}") };
                    folder(&format!("f{i}"), &name, None)
                })
                .collect();
            let result = reconcile(&remote, &cached);
            let s = result.summary;
            assert_eq!(s.added + s.updated + s.unchanged(), s.total);
            let remote_ids: HashSet<&str> = remote.iter().map(|r| r.id.as_str()).collect();
            let expected_removed = cached
                .iter()
                .filter(|c| !remote_ids.contains(c.id.as_str()))
                .count();
            assert_eq!(s.removed, expected_removed);
        }
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let remote = vec![
            folder("", "nameless", None),
            folder("x", "X", None),
            folder("x", "X again", None),
        ];
        let result = reconcile(&remote, &[]);
        assert_eq!(result.summary.total, 1);
        assert_eq!(result.summary.added, 1);
        assert_eq!(result.next_cache, vec![folder("x", "X", None)]);
    }

    #[test]
    fn test_empty_remote_removes_everything() {
        let cached = vec![folder("a", "A", None), folder("b", "B", None)];
        let result = reconcile(&[], &cached);
        assert_eq!(result.summary.removed, 2);
        assert_eq!(result.summary.total, 0);
        assert!(result.next_cache.is_empty());
    }
}
