//! Project files and their saved versions.

use crate::error::ProjectError;
use crate::history::VersionHistory;
use crate::syntax::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filename of the page rendered by the preview tab.
pub const INDEX_HTML: &str = "index.html";

/// Marker the generator emits where a user-supplied image belongs.
pub const CUSTOM_IMAGE_PLACEHOLDER: &str = "{{CUSTOM_IMAGE_PLACEHOLDER}}";

/// Identifier of a saved version, unique within a [`VersionStore`](crate::VersionStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub u64);

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a version was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionLabel {
    /// Content superseded by an explicit save.
    #[serde(rename = "Saved Version")]
    Saved,
    /// Content superseded by a restore of an older version.
    #[serde(rename = "Auto-backup before Revert")]
    AutoBackup,
}

impl VersionLabel {
    /// Human readable label shown in the history panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "Saved Version",
            Self::AutoBackup => "Auto-backup before Revert",
        }
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of content that was live right before it was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    pub id: VersionId,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    pub label: VersionLabel,
}

impl FileVersion {
    pub fn new(id: VersionId, content: impl Into<String>, label: VersionLabel) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            content: content.into(),
            label,
        }
    }
}

/// One generated file.
///
/// Values are never mutated once built. A save or restore produces a new
/// `ProjectFile` through [`ProjectFile::revised`] which the project then swaps
/// in for the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    filename: String,
    language: Language,
    content: String,
    #[serde(default)]
    history: VersionHistory,
}

impl ProjectFile {
    /// Creates a freshly generated file with an empty history.
    pub fn new(filename: impl Into<String>, language: Language, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            language,
            content: content.into(),
            history: VersionHistory::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The committed content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Superseded versions, most recent first.
    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    /// Returns a new value holding `content`, with `backup` recorded at the
    /// front of the history.
    ///
    /// `backup` must carry the content of `self` being superseded.
    pub fn revised(&self, content: String, backup: FileVersion) -> Self {
        debug_assert_eq!(backup.content, self.content);
        let mut history = self.history.clone();
        history.push_front(backup);
        Self {
            filename: self.filename.clone(),
            language: self.language,
            content,
            history,
        }
    }

    /// Returns a copy with every custom image marker replaced by `image`.
    fn with_custom_image(&self, image: &str) -> Self {
        Self {
            content: self.content.replace(CUSTOM_IMAGE_PLACEHOLDER, image),
            ..self.clone()
        }
    }
}

/// The files of one generated project, keyed by filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    files: Vec<ProjectFile>,
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a project, rejecting duplicate filenames.
    pub fn from_files(files: Vec<ProjectFile>) -> Result<Self, ProjectError> {
        for (i, file) in files.iter().enumerate() {
            if files[..i].iter().any(|f| f.filename == file.filename) {
                return Err(ProjectError::DuplicateFilename(file.filename.clone()));
            }
        }
        Ok(Self { files })
    }

    /// Injects a user supplied image URI into `index.html`.
    pub fn apply_custom_image(&mut self, image: &str) {
        for file in &mut self.files {
            if file.filename == INDEX_HTML {
                *file = file.with_custom_image(image);
            }
        }
    }

    pub fn files(&self) -> &[ProjectFile] {
        &self.files
    }

    pub fn get(&self, filename: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.filename == filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.get(filename).is_some()
    }

    /// Swaps in `file` for the existing file of the same name.
    ///
    /// Returns the replaced value, or `None` (leaving the project untouched)
    /// if no such file exists.
    pub fn replace(&mut self, file: ProjectFile) -> Option<ProjectFile> {
        let slot = self.files.iter_mut().find(|f| f.filename == file.filename)?;
        Some(std::mem::replace(slot, file))
    }

    /// The file shown by default after generation: `index.html`, else the first file.
    pub fn default_file(&self) -> Option<&ProjectFile> {
        self.get(INDEX_HTML).or_else(|| self.files.first())
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.filename.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ProjectFile> {
        vec![
            ProjectFile::new("styles.css", Language::Css, "body {}"),
            ProjectFile::new("index.html", Language::Html, "<img src=\"{{CUSTOM_IMAGE_PLACEHOLDER}}\">"),
        ]
    }

    #[test]
    fn test_duplicate_filenames_rejected() {
        let mut files = sample();
        files.push(ProjectFile::new("styles.css", Language::Css, ""));
        assert_eq!(
            Project::from_files(files),
            Err(ProjectError::DuplicateFilename("styles.css".to_string()))
        );
    }

    #[test]
    fn test_default_file_prefers_index() {
        let project = Project::from_files(sample()).unwrap();
        assert_eq!(project.default_file().unwrap().filename(), "index.html");

        let project = Project::from_files(vec![ProjectFile::new("a.js", Language::JavaScript, "")]).unwrap();
        assert_eq!(project.default_file().unwrap().filename(), "a.js");

        assert!(Project::new().default_file().is_none());
    }

    #[test]
    fn test_custom_image_only_touches_index() {
        let mut files = sample();
        files.push(ProjectFile::new("script.js", Language::JavaScript, CUSTOM_IMAGE_PLACEHOLDER));
        let mut project = Project::from_files(files).unwrap();
        project.apply_custom_image("data:image/png;base64,AAAA");

        assert_eq!(
            project.get("index.html").unwrap().content(),
            "<img src=\"data:image/png;base64,AAAA\">"
        );
        assert_eq!(project.get("script.js").unwrap().content(), CUSTOM_IMAGE_PLACEHOLDER);
    }

    #[test]
    fn test_revised_leaves_original_untouched() {
        let file = ProjectFile::new("a.py", Language::Python, "old");
        let backup = FileVersion::new(VersionId(1), "old", VersionLabel::Saved);
        let next = file.revised("new".to_string(), backup);

        assert_eq!(file.content(), "old");
        assert!(file.history().is_empty());
        assert_eq!(next.content(), "new");
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.history().latest().unwrap().content, "old");
    }

    #[test]
    fn test_replace_unknown_file() {
        let mut project = Project::from_files(sample()).unwrap();
        let stranger = ProjectFile::new("nope.txt", Language::Other, "");
        assert!(project.replace(stranger).is_none());
        assert_eq!(project.len(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(VersionLabel::Saved.to_string(), "Saved Version");
        assert_eq!(VersionLabel::AutoBackup.to_string(), "Auto-backup before Revert");
    }

    #[test]
    fn test_labels_serialize_as_displayed() {
        for label in [VersionLabel::Saved, VersionLabel::AutoBackup] {
            let json = serde_json::to_value(label).unwrap();
            assert_eq!(json, label.as_str());
            assert_eq!(serde_json::from_value::<VersionLabel>(json).unwrap(), label);
        }
    }
}
