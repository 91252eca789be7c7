//! Navigation intents held by the unsaved-changes guard.

use serde::{Deserialize, Serialize};

/// The two views of the selected project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewTab {
    /// Rendered `index.html`.
    #[default]
    Preview,
    /// Source of the selected file.
    Code,
}

/// An action that may discard unsaved edits and therefore goes through
/// [`Workspace::guard`](crate::Workspace::guard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum NavIntent {
    /// Show another file in the code view.
    SelectFile(String),
    /// Switch between preview and code.
    SwitchTab(ViewTab),
    /// Leave edit mode, dropping the scratch buffer.
    CancelEdit,
    /// Throw the project away to make room for a new generation.
    Generate,
}

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    SaveAndProceed,
    DiscardAndProceed,
    Cancel,
}

/// What [`Workspace::guard`](crate::Workspace::guard) did with an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No unsaved changes; the intent ran immediately.
    Executed(NavIntent),
    /// Unsaved changes; the intent waits for a [`Resolution`].
    Pending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serialization() {
        let json = serde_json::to_string(&NavIntent::SelectFile("styles.css".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"select_file","target":"styles.css"}"#);

        let json = serde_json::to_string(&NavIntent::SwitchTab(ViewTab::Code)).unwrap();
        assert_eq!(json, r#"{"kind":"switch_tab","target":"code"}"#);

        let back: NavIntent = serde_json::from_str(r#"{"kind":"cancel_edit"}"#).unwrap();
        assert_eq!(back, NavIntent::CancelEdit);
    }
}
