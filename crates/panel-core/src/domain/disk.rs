//! Disk usage slice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path label to backend-formatted size (`"1.2G"`).
///
/// Sizes are opaque strings; the client never parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiskUsageMap(BTreeMap<String, String>);

impl DiskUsageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to add an entry.
    pub fn with(mut self, path: impl Into<String>, size: impl Into<String>) -> Self {
        self.0.insert(path.into(), size.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DiskUsageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
