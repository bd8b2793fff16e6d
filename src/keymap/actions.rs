//! Semantic actions that key bindings resolve to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Navigation (lists, tables, calendar)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToEnd,
    /// Cursor to start of input
    Home,
    /// Cursor to end of input
    End,

    // Selection
    /// Pick the highlighted item / continue to the next step
    Confirm,
    /// Go back one step or close a popup
    Cancel,
    ToggleSelect,

    // Global
    Quit,

    // Screen actions
    /// Start a new booking from scratch
    Restart,
    Refresh,
    Create,
    Edit,
    /// Cancel the highlighted appointment
    Delete,
    /// Open the appointment filter
    Search,
    ClearFilter,
    ChangeStage,
    ToggleActive,
    Save,

    // Text editing
    Backspace,
    DeleteChar,

    // Tabs / form fields
    NextTab,
    PrevTab,

    // Prompts
    Yes,
    No,
}

impl Action {
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::Home => "Home",
            Action::End => "End",
            Action::Confirm => "Confirm",
            Action::Cancel => "Back",
            Action::ToggleSelect => "Toggle",
            Action::Quit => "Quit",
            Action::Restart => "New booking",
            Action::Refresh => "Refresh",
            Action::Create => "New",
            Action::Edit => "Edit",
            Action::Delete => "Cancel appointment",
            Action::Search => "Filter",
            Action::ClearFilter => "Clear filter",
            Action::ChangeStage => "Change stage",
            Action::ToggleActive => "Activate/deactivate",
            Action::Save => "Save",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
            Action::NextTab => "Next tab",
            Action::PrevTab => "Previous tab",
            Action::Yes => "Yes",
            Action::No => "No",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToEnd
            | Action::Home
            | Action::End => "Navigation",

            Action::Confirm | Action::Cancel | Action::ToggleSelect => "Selection",

            Action::Quit => "Global",

            Action::Restart => "Booking",

            Action::Refresh
            | Action::Create
            | Action::Edit
            | Action::Delete
            | Action::Search
            | Action::ClearFilter
            | Action::ChangeStage
            | Action::ToggleActive
            | Action::Save => "Admin",

            Action::Backspace | Action::DeleteChar => "Text Editing",

            Action::NextTab | Action::PrevTab => "Tabs",

            Action::Yes | Action::No => "Prompts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_category() {
        assert_eq!(Action::MoveUp.category(), "Navigation");
        assert_eq!(Action::Restart.category(), "Booking");
        assert_eq!(Action::ChangeStage.category(), "Admin");
    }

    #[test]
    fn test_action_serde_names() {
        assert_eq!(
            serde_json::to_string(&Action::ToggleActive).unwrap(),
            "\"toggle_active\""
        );
        let action: Action = serde_json::from_str("\"change_stage\"").unwrap();
        assert_eq!(action, Action::ChangeStage);
    }
}
