use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::RegionSnapshot;

/// Latest snapshot per region identifier. Entries are only ever replaced as a
/// whole; readers get an `Arc` to the snapshot that was current at lookup time.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: RwLock<HashMap<String, Arc<RegionSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, region: &str) -> Option<Arc<RegionSnapshot>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(region)
            .cloned()
    }

    pub fn replace(&self, region: &str, snapshot: RegionSnapshot) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(region.to_string(), Arc::new(snapshot));
    }

    pub fn entries(&self) -> HashMap<String, Arc<RegionSnapshot>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::types::SnapshotInfo;

    fn snapshot(datestring: &str) -> RegionSnapshot {
        RegionSnapshot {
            info: SnapshotInfo {
                date: "2026-10-19T14:00:00.000Z".to_string(),
                datestring: datestring.to_string(),
                legal: "test".to_string(),
            },
            data: IndexMap::new(),
        }
    }

    #[test]
    fn lookup_of_unknown_region_is_absent() {
        let cache = SnapshotCache::new();
        assert!(cache.lookup("EDMM").is_none());
        assert!(cache.entries().is_empty());
    }

    #[test]
    fn replace_overwrites_the_whole_entry() {
        let cache = SnapshotCache::new();
        cache.replace("EDMM", snapshot("1914"));
        let before = cache.lookup("EDMM").unwrap();

        cache.replace("EDMM", snapshot("1915"));

        assert_eq!(before.info.datestring, "1914");
        assert_eq!(cache.lookup("EDMM").unwrap().info.datestring, "1915");
        assert_eq!(cache.entries().len(), 1);
    }

    #[test]
    fn entries_is_a_point_in_time_copy() {
        let cache = SnapshotCache::new();
        cache.replace("EDGG", snapshot("1914"));
        let copy = cache.entries();
        cache.replace("EDWW", snapshot("1914"));

        assert_eq!(copy.len(), 1);
        assert_eq!(cache.entries().len(), 2);
    }
}
