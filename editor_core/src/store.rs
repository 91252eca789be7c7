//! Version store: save and restore with backup-before-overwrite.

use crate::error::StoreError;
use crate::project::{FileVersion, Project, ProjectFile, VersionId, VersionLabel};

/// Result of a [`VersionStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content changed; the previous content was recorded under this id.
    Saved(VersionId),
    /// New content equals the committed content; nothing was recorded.
    Unchanged,
}

impl SaveOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Owns the files of the current project and every file's history.
///
/// History only ever grows: both operations record the content being
/// replaced before replacing it, so the current content is never in the
/// history and every restore can itself be undone by another restore.
#[derive(Debug, Default)]
pub struct VersionStore {
    project: Project,
    next_version: u64,
}

impl VersionStore {
    /// Creates a store with no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over an existing project.
    pub fn with_project(project: Project) -> Self {
        let next_version = project
            .files()
            .iter()
            .flat_map(|f| f.history().iter())
            .map(|v| v.id.0 + 1)
            .max()
            .unwrap_or(0);
        Self {
            project,
            next_version,
        }
    }

    /// Replaces every file wholesale.
    pub fn load(&mut self, project: Project) {
        log::debug!("Loading project with {} files", project.len());
        *self = Self::with_project(project);
    }

    /// Discards every file.
    pub fn clear(&mut self) {
        self.project = Project::new();
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn file(&self, filename: &str) -> Option<&ProjectFile> {
        self.project.get(filename)
    }

    /// Commits `new_content` to `filename`.
    ///
    /// Saving content equal to the committed content is a no-op and records
    /// nothing.
    pub fn save(&mut self, filename: &str, new_content: &str) -> Result<SaveOutcome, StoreError> {
        let file = self.require(filename)?;
        if file.content() == new_content {
            log::debug!("Save of {} skipped, content unchanged", filename);
            return Ok(SaveOutcome::Unchanged);
        }

        let id = self.next_id();
        let backup = FileVersion::new(id, self.require(filename)?.content(), VersionLabel::Saved);
        self.commit(filename, new_content.to_string(), backup)?;
        log::debug!("Saved {} (previous content kept as {})", filename, id);
        Ok(SaveOutcome::Saved(id))
    }

    /// Restores `filename` to the content of `version`.
    ///
    /// The current content is first recorded as an auto-backup. The restored
    /// entry itself stays in the history. Fails if `version` is not in the
    /// file's history.
    pub fn restore(&mut self, filename: &str, version: VersionId) -> Result<VersionId, StoreError> {
        let file = self.require(filename)?;
        let restored = match file.history().get(version) {
            Some(v) => v.content.clone(),
            None => {
                log::warn!("Rejected restore of {} to unknown version {}", filename, version);
                return Err(StoreError::VersionNotFound {
                    filename: filename.to_string(),
                    version,
                });
            }
        };

        let id = self.next_id();
        let backup = FileVersion::new(id, self.require(filename)?.content(), VersionLabel::AutoBackup);
        self.commit(filename, restored, backup)?;
        log::debug!("Restored {} to {} (backup {})", filename, version, id);
        Ok(id)
    }

    fn commit(&mut self, filename: &str, content: String, backup: FileVersion) -> Result<(), StoreError> {
        let revised = self.require(filename)?.revised(content, backup);
        self.project
            .replace(revised)
            .map(|_| ())
            .ok_or_else(|| StoreError::FileNotFound(filename.to_string()))
    }

    fn require(&self, filename: &str) -> Result<&ProjectFile, StoreError> {
        self.project.get(filename).ok_or_else(|| {
            log::warn!("Unknown file: {}", filename);
            StoreError::FileNotFound(filename.to_string())
        })
    }

    fn next_id(&mut self) -> VersionId {
        let id = VersionId(self.next_version);
        self.next_version += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Language;

    fn store_with(content: &str) -> VersionStore {
        let file = ProjectFile::new("index.html", Language::Html, content);
        VersionStore::with_project(Project::from_files(vec![file]).unwrap())
    }

    #[test]
    fn test_save_equal_content_is_noop() {
        let mut store = store_with("A");
        assert_eq!(store.save("index.html", "A"), Ok(SaveOutcome::Unchanged));

        let file = store.file("index.html").unwrap();
        assert_eq!(file.content(), "A");
        assert!(file.history().is_empty());
    }

    #[test]
    fn test_save_records_previous_content() {
        let mut store = store_with("A");
        let outcome = store.save("index.html", "B").unwrap();
        assert!(outcome.changed());

        let file = store.file("index.html").unwrap();
        assert_eq!(file.content(), "B");
        assert_eq!(file.history().len(), 1);
        let latest = file.history().latest().unwrap();
        assert_eq!(latest.content, "A");
        assert_eq!(latest.label, VersionLabel::Saved);
    }

    #[test]
    fn test_restore_adds_backup_and_keeps_target() {
        let mut store = store_with("A");
        let SaveOutcome::Saved(a) = store.save("index.html", "B").unwrap() else {
            panic!("expected save");
        };

        store.restore("index.html", a).unwrap();
        let file = store.file("index.html").unwrap();
        assert_eq!(file.content(), "A");
        assert_eq!(file.history().len(), 2);
        let backup = file.history().latest().unwrap();
        assert_eq!(backup.content, "B");
        assert_eq!(backup.label, VersionLabel::AutoBackup);
        assert!(file.history().contains(a));
    }

    #[test]
    fn test_restore_unknown_version_rejected() {
        let mut store = store_with("A");
        let err = store.restore("index.html", VersionId(42)).unwrap_err();
        assert_eq!(
            err,
            StoreError::VersionNotFound {
                filename: "index.html".to_string(),
                version: VersionId(42),
            }
        );
        assert_eq!(store.file("index.html").unwrap().content(), "A");
    }

    #[test]
    fn test_unknown_file() {
        let mut store = store_with("A");
        assert_eq!(
            store.save("missing.css", "x"),
            Err(StoreError::FileNotFound("missing.css".to_string()))
        );
    }

    #[test]
    fn test_version_ids_not_reused_across_files() {
        let files = vec![
            ProjectFile::new("a.js", Language::JavaScript, "1"),
            ProjectFile::new("b.js", Language::JavaScript, "1"),
        ];
        let mut store = VersionStore::with_project(Project::from_files(files).unwrap());
        let first = store.save("a.js", "2").unwrap();
        let second = store.save("b.js", "2").unwrap();
        assert_ne!(first, second);

        // A version of a.js is not restorable on b.js
        let SaveOutcome::Saved(id) = first else { panic!("expected save") };
        assert!(store.restore("b.js", id).is_err());
    }

    #[test]
    fn test_ids_continue_after_loaded_history() {
        let mut store = store_with("A");
        store.save("index.html", "B").unwrap();
        let project = store.project().clone();

        let mut reloaded = VersionStore::with_project(project);
        let outcome = reloaded.save("index.html", "C").unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(VersionId(1)));
    }
}
