//! Editing session over the files of a generated project.

use crate::buffer::TextBuffer;
use crate::error::{GenerationError, ProjectError, StoreError};
use crate::generation::{normalize_prompt, ProjectGenerator};
use crate::intent::{GuardOutcome, NavIntent, Resolution, ViewTab};
use crate::project::{Project, ProjectFile, VersionId, INDEX_HTML};
use crate::store::{SaveOutcome, VersionStore};
use crate::syntax::HighlightCache;

/// The editing session: which file is selected, whether it is being edited,
/// the scratch buffer, and at most one navigation intent waiting on the
/// unsaved-changes prompt.
///
/// Every change to the files goes through the [`VersionStore`].
#[derive(Debug, Default)]
pub struct Workspace {
    /// Files and their histories.
    store: VersionStore,
    /// Filename of the selected file.
    selected: Option<String>,
    /// Whether the selected file is in edit mode.
    editing: bool,
    /// Uncommitted text, meaningful only while editing.
    buffer: TextBuffer,
    /// Active view.
    active_tab: ViewTab,
    /// Whether the version history panel is shown.
    history_panel_open: bool,
    /// Intent waiting for a [`Resolution`].
    pending: Option<NavIntent>,
    /// Rendered code view of the selected file.
    highlight_cache: HighlightCache,
}

impl Workspace {
    /// Creates a workspace with no project.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self) -> &Project {
        self.store.project()
    }

    /// Returns the selected file, as currently committed.
    pub fn selected_file(&self) -> Option<&ProjectFile> {
        self.selected.as_deref().and_then(|name| self.store.file(name))
    }

    pub fn selected_filename(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The scratch buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn active_tab(&self) -> ViewTab {
        self.active_tab
    }

    pub fn is_history_panel_open(&self) -> bool {
        self.history_panel_open
    }

    /// The intent waiting on the unsaved-changes prompt, if any.
    pub fn pending_intent(&self) -> Option<&NavIntent> {
        self.pending.as_ref()
    }

    /// True while editing with a buffer that differs from the committed content.
    pub fn has_unsaved_changes(&self) -> bool {
        if !self.editing {
            return false;
        }
        self.selected_file()
            .map(|file| !self.buffer.matches(file.content()))
            .unwrap_or(false)
    }

    /// Whether closing the page should ask for confirmation.
    pub fn should_block_unload(&self) -> bool {
        self.has_unsaved_changes()
    }

    // --- Editing ---

    /// Enters edit mode, seeding the buffer from the committed content.
    /// Returns false if no file is selected.
    pub fn begin_edit(&mut self) -> bool {
        let Some(content) = self.selected_file().map(|f| f.content().to_string()) else {
            return false;
        };
        self.buffer = TextBuffer::from_text(&content);
        self.editing = true;
        true
    }

    /// Switches edit mode. Leaving edit mode commits the buffer as it stands.
    ///
    /// Returns the save outcome when leaving edit mode, `None` when entering.
    pub fn toggle_edit_mode(&mut self) -> Result<Option<SaveOutcome>, StoreError> {
        if self.editing {
            let outcome = self.save_changes()?;
            self.editing = false;
            Ok(Some(outcome))
        } else {
            self.begin_edit();
            Ok(None)
        }
    }

    /// Replaces the scratch buffer. Ignored outside edit mode.
    pub fn set_buffer_text(&mut self, text: &str) -> bool {
        if self.editing {
            self.buffer.set_text(text);
        }
        self.editing
    }

    /// Inserts into the scratch buffer. Ignored outside edit mode.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> bool {
        if self.editing {
            self.buffer.insert(char_idx, text);
        }
        self.editing
    }

    /// Removes from the scratch buffer. Ignored outside edit mode.
    pub fn remove(&mut self, start: usize, end: usize) -> bool {
        if self.editing {
            self.buffer.remove(start, end);
        }
        self.editing
    }

    /// Commits the scratch buffer to the selected file. Edit mode is left
    /// as it is.
    pub fn save_changes(&mut self) -> Result<SaveOutcome, StoreError> {
        let Some(name) = self.selected.as_deref() else {
            return Ok(SaveOutcome::Unchanged);
        };
        self.store.save(name, &self.buffer.text())
    }

    /// Restores the selected file to `version`.
    ///
    /// While editing, the buffer follows the restored content so a later
    /// commit does not overwrite the restore with stale text.
    pub fn restore_version(&mut self, version: VersionId) -> Result<VersionId, StoreError> {
        let name = self.selected.as_deref().ok_or(StoreError::NoSelection)?;
        let backup = self.store.restore(name, version)?;

        if self.editing {
            if let Some(file) = self.store.file(name) {
                self.buffer = TextBuffer::from_text(file.content());
            }
        }
        self.history_panel_open = false;
        Ok(backup)
    }

    pub fn toggle_history_panel(&mut self) {
        self.history_panel_open = !self.history_panel_open;
    }

    // --- Navigation guard ---

    /// Runs `intent` now if nothing would be lost, otherwise parks it until
    /// [`Workspace::resolve`] is called.
    ///
    /// A parked intent is replaced, never queued, by a newer one.
    pub fn guard(&mut self, intent: NavIntent) -> GuardOutcome {
        if !self.has_unsaved_changes() {
            if let Some(previous) = self.pending.take() {
                log::debug!("Pending intent {:?} abandoned", previous);
            }
            self.execute(&intent);
            return GuardOutcome::Executed(intent);
        }

        if let Some(previous) = self.pending.replace(intent) {
            log::debug!("Pending intent {:?} abandoned", previous);
        }
        log::debug!("Unsaved changes, awaiting resolution for {:?}", self.pending);
        GuardOutcome::Pending
    }

    /// Answers the unsaved-changes prompt.
    ///
    /// Returns the intent that ran, if any. With nothing pending this does
    /// nothing, so resolving twice never runs an intent twice.
    pub fn resolve(&mut self, resolution: Resolution) -> Result<Option<NavIntent>, StoreError> {
        if self.pending.is_none() {
            log::warn!("Resolution {:?} with no pending intent", resolution);
            return Ok(None);
        }

        match resolution {
            Resolution::Cancel => {
                self.pending = None;
                Ok(None)
            }
            Resolution::SaveAndProceed => {
                // Outside edit mode the buffer is stale
                if self.editing {
                    self.save_changes()?;
                }
                self.editing = false;
                Ok(self.run_pending())
            }
            Resolution::DiscardAndProceed => {
                self.editing = false;
                Ok(self.run_pending())
            }
        }
    }

    fn run_pending(&mut self) -> Option<NavIntent> {
        let intent = self.pending.take()?;
        self.execute(&intent);
        Some(intent)
    }

    fn execute(&mut self, intent: &NavIntent) {
        log::debug!("Executing {:?}", intent);
        match intent {
            NavIntent::SelectFile(name) => self.select_file(name),
            NavIntent::SwitchTab(tab) => self.active_tab = *tab,
            NavIntent::CancelEdit => {
                self.editing = false;
                if let Some(content) = self.selected_file().map(|f| f.content().to_string()) {
                    self.buffer = TextBuffer::from_text(&content);
                }
            }
            NavIntent::Generate => self.begin_generation(),
        }
    }

    fn select_file(&mut self, name: &str) {
        if !self.store.project().contains(name) {
            log::warn!("Ignoring selection of unknown file {}", name);
            return;
        }
        self.selected = Some(name.to_string());
        self.active_tab = ViewTab::Code;
        self.editing = false;
        self.history_panel_open = false;
    }

    /// Guarded file selection. `Ok(None)` if the file is already selected.
    pub fn try_select_file(&mut self, name: &str) -> Result<Option<GuardOutcome>, StoreError> {
        if self.selected.as_deref() == Some(name) {
            return Ok(None);
        }
        if !self.store.project().contains(name) {
            return Err(StoreError::FileNotFound(name.to_string()));
        }
        Ok(Some(self.guard(NavIntent::SelectFile(name.to_string()))))
    }

    /// Guarded tab switch. `None` if the tab is already active.
    pub fn try_switch_tab(&mut self, tab: ViewTab) -> Option<GuardOutcome> {
        if self.active_tab == tab {
            return None;
        }
        Some(self.guard(NavIntent::SwitchTab(tab)))
    }

    /// Guarded exit from edit mode without saving.
    pub fn try_cancel_edit(&mut self) -> GuardOutcome {
        self.guard(NavIntent::CancelEdit)
    }

    /// Guarded start of a new generation.
    pub fn try_generate(&mut self) -> GuardOutcome {
        self.guard(NavIntent::Generate)
    }

    // --- Generation lifecycle ---

    /// Drops the project and all session state tied to it.
    pub fn begin_generation(&mut self) {
        self.store.clear();
        self.selected = None;
        self.reset_session();
    }

    /// Clears everything that belongs to the previous project's editing
    /// session, including any intent still waiting on a resolution.
    fn reset_session(&mut self) {
        if let Some(previous) = self.pending.take() {
            log::debug!("Pending intent {:?} dropped by generation", previous);
        }
        self.editing = false;
        self.buffer = TextBuffer::new();
        self.history_panel_open = false;
        self.highlight_cache.invalidate();
    }

    /// Installs freshly generated files, selecting `index.html` (or the first
    /// file) and showing the preview.
    pub fn finish_generation(
        &mut self,
        files: Vec<ProjectFile>,
        custom_image: Option<&str>,
    ) -> Result<(), ProjectError> {
        let mut project = Project::from_files(files)?;
        if let Some(image) = custom_image {
            project.apply_custom_image(image);
        }
        self.selected = project.default_file().map(|f| f.filename().to_string());
        self.store.load(project);
        self.reset_session();
        self.active_tab = ViewTab::Preview;
        log::info!("Project ready with {} files", self.store.project().len());
        Ok(())
    }

    /// Runs a full generation: clears the workspace, asks `generator` for
    /// files and installs them. A blank prompt does nothing.
    ///
    /// On failure the workspace stays empty.
    pub fn generate(
        &mut self,
        generator: &dyn ProjectGenerator,
        prompt: &str,
        custom_image: Option<&str>,
    ) -> Result<(), GenerationError> {
        let Some(prompt) = normalize_prompt(prompt) else {
            return Ok(());
        };
        self.begin_generation();
        let files = generator.generate(prompt, custom_image.is_some())?;
        self.finish_generation(files, custom_image)?;
        Ok(())
    }

    // --- Views ---

    /// Committed `index.html`, or empty if the project has none.
    pub fn preview_html(&self) -> &str {
        self.store.file(INDEX_HTML).map(|f| f.content()).unwrap_or("")
    }

    /// Highlighted committed content of the selected file.
    pub fn highlighted_view(&mut self) -> Option<&str> {
        let file = self.selected.as_deref().and_then(|name| self.store.file(name))?;
        Some(self.highlight_cache.get(file.content(), file.language()))
    }

    /// Filename and text of a download of the selected file: the buffer
    /// while editing, the committed content otherwise.
    pub fn export_content(&self) -> Option<(&str, String)> {
        let file = self.selected_file()?;
        let content = if self.editing {
            self.buffer.text()
        } else {
            file.content().to_string()
        };
        Some((file.filename(), content))
    }
}
