//! Customizable key bindings: a preset (standard, vim, emacs) plus user overrides.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, parse_key_string, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// Checked before the preset
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new(preset: KeymapPreset) -> Self {
        Self {
            preset,
            overrides: Vec::new(),
        }
    }

    /// Resolve a key event to an action.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// Overrides followed by the preset bindings they don't shadow.
    ///
    /// Overriding an action drops every preset key for that action.
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|preset| !self.overrides.iter().any(|o| o.action == preset.action)),
        );
        bindings
    }

    /// Display form of the first key bound to `action`.
    pub fn key_for(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| format!("{:?}", action))
    }

    pub fn navigation_display(&self) -> String {
        format!(
            "{}/{}",
            self.key_for(Action::MoveUp),
            self.key_for(Action::MoveDown)
        )
    }

    /// `"Enter: Confirm"`, using the binding's own description when it has one.
    pub fn hint(&self, action: Action) -> String {
        match self.all_bindings().into_iter().find(|b| b.action == action) {
            Some(binding) => format!("{}: {}", binding.display(), binding.get_description()),
            None => format!("{:?}: {}", action, action.description()),
        }
    }

    /// Footer line made of hints joined by `|`, navigation first.
    pub fn footer(&self, actions: &[Action]) -> String {
        let mut parts = vec![format!("{}: Navigate", self.navigation_display())];
        parts.extend(actions.iter().map(|a| self.hint(*a)));
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.preset, KeymapPreset::Standard);
        assert!(keymap.overrides.is_empty());
        assert_eq!(
            keymap.get_action(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let keymap = Keymap {
            preset: KeymapPreset::Standard,
            overrides: vec![KeyBinding::new("q", Action::Refresh)],
        };
        assert_eq!(
            keymap.get_action(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Refresh)
        );
        // `r` no longer refreshes once Refresh is overridden
        assert_eq!(keymap.get_action(KeyCode::Char('r'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_vim_preset() {
        let keymap = Keymap::new(KeymapPreset::Vim);
        assert_eq!(
            keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE),
            Some(Action::MoveDown)
        );
        assert_eq!(
            keymap.get_action(KeyCode::Char('X'), KeyModifiers::SHIFT),
            Some(Action::ClearFilter)
        );
    }

    #[test]
    fn test_footer_reflects_overrides() {
        let keymap = Keymap {
            preset: KeymapPreset::Standard,
            overrides: vec![KeyBinding::new("ctrl+r", Action::Restart)],
        };
        let footer = keymap.footer(&[Action::Confirm, Action::Restart]);
        assert_eq!(footer, "↑/↓: Navigate | Enter: Confirm | Ctrl+R: New booking");
    }
}
