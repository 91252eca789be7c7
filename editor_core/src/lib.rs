//! Sitegen Core - Versioned editing of generated project files.
//!
//! This crate holds the files of a generated website project, their
//! save/restore history, the unsaved-changes navigation guard and the
//! highlighter that renders committed content for display. It performs no
//! I/O; the generative backend is reached through [`ProjectGenerator`].

pub mod buffer;
pub mod error;
pub mod generation;
pub mod history;
pub mod intent;
pub mod project;
pub mod store;
pub mod syntax;
pub mod workspace;

pub use buffer::TextBuffer;
pub use error::{GenerationError, ProjectError, StoreError};
pub use generation::{enhance_or_original, parse_generation_response, ProjectGenerator};
pub use history::VersionHistory;
pub use intent::{GuardOutcome, NavIntent, Resolution, ViewTab};
pub use project::{FileVersion, Project, ProjectFile, VersionId, VersionLabel};
pub use store::{SaveOutcome, VersionStore};
pub use syntax::{highlight, HighlightCache, Language, Theme, TokenStyle};
pub use workspace::Workspace;
