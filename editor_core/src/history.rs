//! Per-file backup history.

use crate::project::{FileVersion, VersionId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Superseded versions of a file, most recent first.
///
/// Entries are only ever added at the front; nothing is dropped, so a
/// version handed out by [`VersionHistory::get`] stays restorable for the
/// lifetime of the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionHistory {
    entries: VecDeque<FileVersion>,
}

impl VersionHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a version as the most recent entry.
    pub fn push_front(&mut self, version: FileVersion) {
        self.entries.push_front(version);
    }

    /// Returns the most recently recorded version.
    pub fn latest(&self) -> Option<&FileVersion> {
        self.entries.front()
    }

    /// Looks up a version by id.
    pub fn get(&self, id: VersionId) -> Option<&FileVersion> {
        self.entries.iter().find(|v| v.id == id)
    }

    pub fn contains(&self, id: VersionId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &FileVersion> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a VersionHistory {
    type Item = &'a FileVersion;
    type IntoIter = std::collections::vec_deque::Iter<'a, FileVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::VersionLabel;

    #[test]
    fn test_most_recent_first() {
        let mut history = VersionHistory::new();
        history.push_front(FileVersion::new(VersionId(1), "a", VersionLabel::Saved));
        history.push_front(FileVersion::new(VersionId(2), "b", VersionLabel::AutoBackup));

        let contents: Vec<&str> = history.iter().map(|v| v.content.as_str()).collect();
        assert_eq!(contents, vec!["b", "a"]);
        assert_eq!(history.latest().unwrap().id, VersionId(2));
    }

    #[test]
    fn test_lookup_by_id() {
        let mut history = VersionHistory::new();
        assert!(history.latest().is_none());

        history.push_front(FileVersion::new(VersionId(7), "x", VersionLabel::Saved));
        assert!(history.contains(VersionId(7)));
        assert!(!history.contains(VersionId(8)));
        assert_eq!(history.get(VersionId(7)).unwrap().content, "x");
    }

    #[test]
    fn test_serializes_as_list() {
        let mut history = VersionHistory::new();
        history.push_front(FileVersion::new(VersionId(3), "x", VersionLabel::Saved));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 3);
        assert_eq!(json[0]["label"], "Saved Version");
    }
}
