//! State store: the last snapshot of each slice.

use super::{DiskUsageMap, GitProject, ServiceStatusMap};

/// Latest snapshot per slice.
///
/// Each slice is replaced whole; there is no merging and no history.
/// Readers only ever get shared references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStore {
    status: ServiceStatusMap,
    disk: DiskUsageMap,
    git: Vec<GitProject>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ServiceStatusMap {
        &self.status
    }

    pub fn disk(&self) -> &DiskUsageMap {
        &self.disk
    }

    pub fn git(&self) -> &[GitProject] {
        &self.git
    }

    pub fn replace_status(&mut self, snapshot: ServiceStatusMap) {
        self.status = snapshot;
    }

    pub fn replace_disk(&mut self, snapshot: DiskUsageMap) {
        self.disk = snapshot;
    }

    pub fn replace_git(&mut self, snapshot: Vec<GitProject>) {
        self.git = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Service;

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = StateStore::new();
        store.replace_status(
            ServiceStatusMap::new()
                .with(Service::Node, true)
                .with(Service::Git, true),
        );
        store.replace_status(ServiceStatusMap::new().with(Service::Zsh, true));

        // Node from the first snapshot is gone, not merged
        assert!(!store.status().is_online(Service::Node));
        assert!(store.status().is_online(Service::Zsh));
    }

    #[test]
    fn test_slices_are_independent() {
        let mut store = StateStore::new();
        store.replace_disk(DiskUsageMap::new().with("src", "1.0G"));
        store.replace_git(vec![GitProject::new("a", "main", false)]);
        store.replace_disk(DiskUsageMap::new());

        assert!(store.disk().is_empty());
        assert_eq!(store.git().len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = StateStore::new();
        store.replace_git(vec![GitProject::new("a", "main", false)]);
        store.replace_git(vec![GitProject::new("b", "dev", true)]);
        assert_eq!(store.git()[0].name, "b");
    }
}
