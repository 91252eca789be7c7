//! Error types for the editing core.

use crate::project::VersionId;

/// Errors raised by the version store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No file with this name exists in the project.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The operation needs a selected file and there is none.
    #[error("no file selected")]
    NoSelection,

    /// The version is not part of the file's history.
    #[error("version {version} is not in the history of {filename}")]
    VersionNotFound { filename: String, version: VersionId },
}

/// Errors raised while building a project.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("duplicate filename: {0}")]
    DuplicateFilename(String),
}

/// Errors raised while obtaining a project from the generative backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no response from generator")]
    EmptyResponse,

    #[error("invalid generator response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("generator failed: {0}")]
    Backend(String),
}
