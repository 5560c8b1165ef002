//! Delegated UI actions, keyed by the `data-*` marker on the clicked or
//! submitted element.

use super::form::FormData;

pub const DELETE_OPTION: &str = "data-delete-option";
pub const EXPAND_OPTION: &str = "data-expand-option";
pub const DISMISS_RESULT: &str = "data-dismiss-result";
pub const CLOSE_MODAL: &str = "data-close-modal";
pub const ADD_OPTION_FORM: &str = "data-add-option-form";

/// Every marker the bridge handles. Other markers are ignored.
pub const MARKERS: [&str; 5] = [
    DELETE_OPTION,
    EXPAND_OPTION,
    DISMISS_RESULT,
    CLOSE_MODAL,
    ADD_OPTION_FORM,
];

/// A user interaction on locally rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    DeleteOption { id: String },
    /// Presentation only; the bridge does not act on it.
    ExpandOption { id: String },
    DismissResult,
    CloseModal,
    AddOption { form: FormData, source: Option<String> },
}

impl UiAction {
    /// Build the action for `marker`, whose attribute value is `value`.
    ///
    /// `form` carries the submitted fields for the add form. Returns None
    /// for unknown markers and for option markers with a blank id.
    pub fn from_marker(marker: &str, value: &str, form: Option<FormData>) -> Option<Self> {
        let id = value.trim();
        match marker {
            DELETE_OPTION if !id.is_empty() => Some(UiAction::DeleteOption { id: id.to_string() }),
            EXPAND_OPTION if !id.is_empty() => Some(UiAction::ExpandOption { id: id.to_string() }),
            DISMISS_RESULT => Some(UiAction::DismissResult),
            CLOSE_MODAL => Some(UiAction::CloseModal),
            ADD_OPTION_FORM => Some(UiAction::AddOption {
                form: form.unwrap_or_default(),
                source: (!id.is_empty()).then(|| id.to_string()),
            }),
            _ => None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            UiAction::DeleteOption { .. } => DELETE_OPTION,
            UiAction::ExpandOption { .. } => EXPAND_OPTION,
            UiAction::DismissResult => DISMISS_RESULT,
            UiAction::CloseModal => CLOSE_MODAL,
            UiAction::AddOption { .. } => ADD_OPTION_FORM,
        }
    }
}
