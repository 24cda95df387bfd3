//! A single-field modal used to rename nodes and edges.
//!
//! The editor only holds the text being edited. It never touches the graph store:
//! whoever opened it reads the confirmed value back and applies it.
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenModal {
    title: String,
    value: String,
    focused: bool,
}

/// The rename modal. At most one edit is open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEditor {
    modal: Option<OpenModal>,
}

impl LabelEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the modal with `current_value` in the field and takes input focus.
    ///
    /// Opening while already open resets the field to the new value.
    pub fn open(&mut self, title: impl Into<String>, current_value: impl Into<String>) {
        let title = title.into();
        debug!("Opening label editor '{}'", title);
        self.modal = Some(OpenModal {
            title,
            value: current_value.into(),
            focused: true,
        });
    }

    /// Replaces the field contents, as typing would. Ignored while closed.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if let Some(modal) = self.modal.as_mut() {
            modal.value = value.into();
        }
    }

    /// Confirms the edit and closes the modal, returning the value to apply.
    pub fn save(&mut self) -> Option<String> {
        self.modal.take().map(|modal| modal.value)
    }

    /// Dismisses the modal (button or backdrop). Returns whether it was open.
    pub fn cancel(&mut self) -> bool {
        self.modal.take().is_some()
    }

    /// The field lost input focus, e.g. the user clicked elsewhere in the modal.
    /// The edit stays open.
    pub fn blur(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.focused = false;
        }
    }

    /// Gives the field input focus again. Ignored while closed.
    pub fn focus(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.focused = true;
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.modal.as_ref().map(|m| m.title.as_str())
    }

    pub fn value(&self) -> Option<&str> {
        self.modal.as_ref().map(|m| m.value.as_str())
    }

    pub fn has_focus(&self) -> bool {
        self.modal.as_ref().is_some_and(|m| m.focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_resets_the_field() {
        let mut editor = LabelEditor::new();
        editor.open("Rename node", "First");
        editor.set_value("typed but not saved");
        editor.open("Rename node", "Second");
        assert_eq!(editor.value(), Some("Second"));
        assert!(editor.has_focus());
    }

    #[test]
    fn save_returns_value_and_closes() {
        let mut editor = LabelEditor::new();
        editor.open("Label connection", "");
        editor.set_value("yes");
        assert_eq!(editor.save(), Some("yes".to_string()));
        assert!(!editor.is_open());
        assert_eq!(editor.save(), None);
    }

    #[test]
    fn cancel_discards_value() {
        let mut editor = LabelEditor::new();
        assert!(!editor.cancel());
        editor.open("Rename node", "Keep");
        editor.set_value("Drop");
        assert!(editor.cancel());
        assert_eq!(editor.value(), None);
    }

    #[test]
    fn blur_keeps_the_edit_open() {
        let mut editor = LabelEditor::new();
        editor.focus();
        assert!(!editor.has_focus());

        editor.open("Rename node", "Draft");
        editor.blur();
        assert!(editor.is_open());
        assert!(!editor.has_focus());
        assert_eq!(editor.value(), Some("Draft"));

        editor.focus();
        assert!(editor.has_focus());
        editor.blur();
        editor.open("Rename node", "Other");
        assert!(editor.has_focus());
    }

    #[test]
    fn typing_while_closed_is_ignored() {
        let mut editor = LabelEditor::new();
        editor.set_value("ghost");
        assert!(!editor.is_open());
    }
}
