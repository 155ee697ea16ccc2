//! Secret detail screen and its view/edit state machine.
//!
//! ```text
//!            begin_edit
//!   Viewing ───────────▶ Editing
//!      ▲                   │
//!      └───── cancel ──────┘
//! ```
//!
//! A submission from `Editing` either navigates away (the view is dropped)
//! or fails, in which case the view stays in `Editing` with its draft intact.

use tracing::debug;
use vaultdesk_api::Secret;

use crate::clipboard::Clipboard;
use crate::route::FormData;

/// Which UI is active on the detail screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Viewing,
    Editing,
}

/// Transient edit state of one detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: Mode,
    draft_value: String,
}

impl ViewState {
    /// Fresh state: viewing, draft equal to the loaded value.
    pub fn seeded(value: &str) -> Self {
        Self {
            mode: Mode::Viewing,
            draft_value: value.to_string(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draft_value(&self) -> &str {
        &self.draft_value
    }
}

/// A loaded secret with its view state and the last action error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    secret: Secret,
    state: ViewState,
    error: Option<String>,
}

impl DetailView {
    pub fn new(secret: Secret) -> Self {
        let state = ViewState::seeded(secret.value_or_empty());
        Self {
            secret,
            state,
            error: None,
        }
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn is_editing(&self) -> bool {
        self.state.mode == Mode::Editing
    }

    pub fn draft(&self) -> &str {
        &self.state.draft_value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter edit mode, seeding the draft from the loaded value.
    /// Returns `false` if already editing.
    pub fn begin_edit(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.state = ViewState {
            mode: Mode::Editing,
            draft_value: self.secret.value_or_empty().to_string(),
        };
        true
    }

    /// Replace the draft. Ignored outside edit mode.
    pub fn set_draft(&mut self, value: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.state.draft_value = value.into();
        true
    }

    /// Leave edit mode and discard the draft. Never touches the backend.
    pub fn cancel_edit(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.state = ViewState::seeded(self.secret.value_or_empty());
        self.error = None;
        true
    }

    /// Form to hand to the update action; only available while editing.
    pub fn submission(&self) -> Option<FormData> {
        self.is_editing()
            .then(|| FormData::new().with("value", self.state.draft_value.clone()))
    }

    /// Record a failed update. The view stays in edit mode and keeps the
    /// submitted draft so the user can retry without re-typing.
    pub(crate) fn fail_submit(&mut self, message: String, form: &FormData) {
        self.state.mode = Mode::Editing;
        if let Some(value) = form.get("value") {
            self.state.draft_value = value.to_string();
        }
        self.error = Some(message);
    }

    /// Copy the loaded value to the clipboard. Only available while viewing.
    ///
    /// Best effort: a clipboard failure is logged and otherwise ignored.
    /// Returns whether a copy was attempted.
    pub fn copy_value(&self, clipboard: &dyn Clipboard) -> bool {
        if self.is_editing() {
            return false;
        }
        let Some(value) = self.secret.value.as_deref().filter(|v| !v.is_empty()) else {
            return false;
        };
        if let Err(e) = clipboard.write_text(value) {
            debug!(name = %self.secret.name, error = %e, "clipboard copy failed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Mutex<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("permission denied".into()))
        }
    }

    fn view() -> DetailView {
        DetailView::new(Secret::new("db", "v1"))
    }

    #[test]
    fn test_initial_state_is_viewing_with_seeded_draft() {
        let view = view();
        assert_eq!(view.mode(), Mode::Viewing);
        assert_eq!(view.draft(), "v1");
        assert_eq!(view.error(), None);
        assert_eq!(view.submission(), None);
    }

    #[test]
    fn test_missing_value_seeds_empty_draft() {
        let view = DetailView::new(Secret {
            name: "db".into(),
            value: None,
            description: None,
        });
        assert_eq!(view.draft(), "");
    }

    #[test]
    fn test_edit_then_cancel_restores_value() {
        let mut view = view();
        assert!(view.begin_edit());
        assert!(view.set_draft("v2"));
        assert_eq!(view.draft(), "v2");

        assert!(view.cancel_edit());
        assert_eq!(view.mode(), Mode::Viewing);
        assert_eq!(view.draft(), "v1");
        assert_eq!(view.secret().value.as_deref(), Some("v1"));
    }

    #[test]
    fn test_begin_edit_reseeds_from_value() {
        let mut view = view();
        view.begin_edit();
        view.set_draft("scratch");
        view.cancel_edit();
        view.begin_edit();
        assert_eq!(view.draft(), "v1");
    }

    #[test]
    fn test_set_draft_ignored_while_viewing() {
        let mut view = view();
        assert!(!view.set_draft("v2"));
        assert_eq!(view.draft(), "v1");
        assert!(!view.cancel_edit());
    }

    #[test]
    fn test_submission_carries_draft() {
        let mut view = view();
        view.begin_edit();
        view.set_draft("v2");
        assert_eq!(view.submission(), Some(FormData::new().with("value", "v2")));
    }

    #[test]
    fn test_failed_submit_keeps_editing_and_draft() {
        let mut view = view();
        view.begin_edit();
        view.set_draft("v2");
        let form = view.submission().unwrap();

        view.fail_submit("Failed to update secret".into(), &form);
        assert_eq!(view.mode(), Mode::Editing);
        assert_eq!(view.draft(), "v2");
        assert_eq!(view.error(), Some("Failed to update secret"));

        view.cancel_edit();
        assert_eq!(view.error(), None);
    }

    #[test]
    fn test_copy_only_while_viewing() {
        let clipboard = RecordingClipboard::default();
        let mut view = view();

        assert!(view.copy_value(&clipboard));
        view.begin_edit();
        assert!(!view.copy_value(&clipboard));

        assert_eq!(*clipboard.copied.lock().unwrap(), vec!["v1".to_string()]);
        assert_eq!(view.mode(), Mode::Editing);
    }

    #[test]
    fn test_copy_failure_changes_nothing() {
        let view = view();
        let before = view.clone();
        assert!(view.copy_value(&DeniedClipboard));
        assert_eq!(view, before);
    }
}
