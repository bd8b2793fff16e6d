//! Preset keymaps: Standard, Vim, Emacs

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc
    #[default]
    Standard,
    /// hjkl
    Vim,
    /// Ctrl+N/P/B/F
    Emacs,
}

impl KeymapPreset {
    pub fn bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = match self {
            KeymapPreset::Standard => standard_navigation(),
            KeymapPreset::Vim => vim_navigation(),
            KeymapPreset::Emacs => emacs_navigation(),
        };
        bindings.extend(shared_bindings(*self));
        bindings
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

fn standard_navigation() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("pageup", Action::PageUp),
        KeyBinding::new("pagedown", Action::PageDown),
        KeyBinding::new("home", Action::GoToTop),
        KeyBinding::new("end", Action::GoToEnd),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("ctrl+n", Action::Restart),
        KeyBinding::new("r", Action::Refresh),
        KeyBinding::new("c", Action::Create),
        KeyBinding::new("e", Action::Edit),
        KeyBinding::new("delete", Action::DeleteChar),
    ]
}

fn vim_navigation() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("k", Action::MoveUp),
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("j", Action::MoveDown),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("h", Action::MoveLeft),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("l", Action::MoveRight),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("ctrl+u", Action::PageUp),
        KeyBinding::new("pageup", Action::PageUp),
        KeyBinding::new("ctrl+d", Action::PageDown),
        KeyBinding::new("pagedown", Action::PageDown),
        KeyBinding::new("g", Action::GoToTop),
        KeyBinding::new("home", Action::GoToTop),
        KeyBinding::new("shift+g", Action::GoToEnd),
        KeyBinding::new("end", Action::GoToEnd),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("ctrl+n", Action::Restart),
        KeyBinding::new("r", Action::Refresh),
        KeyBinding::new("o", Action::Create),
        KeyBinding::new("e", Action::Edit),
        KeyBinding::new("x", Action::DeleteChar),
        KeyBinding::new("delete", Action::DeleteChar),
    ]
}

fn emacs_navigation() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("ctrl+p", Action::MoveUp),
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("ctrl+n", Action::MoveDown),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("ctrl+b", Action::MoveLeft),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("ctrl+f", Action::MoveRight),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("alt+v", Action::PageUp),
        KeyBinding::new("pageup", Action::PageUp),
        KeyBinding::new("ctrl+v", Action::PageDown),
        KeyBinding::new("pagedown", Action::PageDown),
        KeyBinding::new("alt+<", Action::GoToTop),
        KeyBinding::new("home", Action::GoToTop),
        KeyBinding::new("alt+>", Action::GoToEnd),
        KeyBinding::new("end", Action::GoToEnd),
        KeyBinding::new("ctrl+g", Action::Cancel),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("alt+n", Action::Restart),
        KeyBinding::new("ctrl+r", Action::Refresh),
        KeyBinding::new("ctrl+o", Action::Create),
        KeyBinding::new("ctrl+e", Action::Edit),
        KeyBinding::new("ctrl+d", Action::DeleteChar),
        KeyBinding::new("delete", Action::DeleteChar),
    ]
}

/// Bindings identical in every preset.
fn shared_bindings(preset: KeymapPreset) -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("space", Action::ToggleSelect),
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("d", Action::Delete),
        KeyBinding::new("/", Action::Search),
        KeyBinding::new("s", Action::ChangeStage),
        KeyBinding::new("a", Action::ToggleActive),
        KeyBinding::new("ctrl+s", Action::Save),
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("tab", Action::NextTab),
        KeyBinding::new("shift+tab", Action::PrevTab),
        KeyBinding::new("y", Action::Yes),
        KeyBinding::new("n", Action::No),
    ];
    // Vim's `x` already deletes a character.
    if preset != KeymapPreset::Vim {
        bindings.push(KeyBinding::new("x", Action::ClearFilter));
    } else {
        bindings.push(KeyBinding::new("shift+x", Action::ClearFilter));
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_can_confirm_cancel_and_quit() {
        for preset in [KeymapPreset::Standard, KeymapPreset::Vim, KeymapPreset::Emacs] {
            let bindings = preset.bindings();
            for action in [
                Action::Confirm,
                Action::Cancel,
                Action::Quit,
                Action::Restart,
                Action::ChangeStage,
            ] {
                assert!(
                    bindings.iter().any(|b| b.action == action),
                    "{} preset lacks {:?}",
                    preset.name(),
                    action
                );
            }
        }
    }

    #[test]
    fn test_vim_has_hjkl() {
        let bindings = KeymapPreset::Vim.bindings();
        for (key, action) in [
            ("h", Action::MoveLeft),
            ("j", Action::MoveDown),
            ("k", Action::MoveUp),
            ("l", Action::MoveRight),
        ] {
            assert!(bindings.iter().any(|b| b.key == key && b.action == action));
        }
    }

    #[test]
    fn test_emacs_restart_does_not_shadow_move_down() {
        let bindings = KeymapPreset::Emacs.bindings();
        let ctrl_n: Vec<Action> = bindings
            .iter()
            .filter(|b| b.key == "ctrl+n")
            .map(|b| b.action)
            .collect();
        assert_eq!(ctrl_n, vec![Action::MoveDown]);
    }

    #[test]
    fn test_preset_serialization() {
        assert_eq!(serde_json::to_string(&KeymapPreset::Vim).unwrap(), "\"vim\"");
        let preset: KeymapPreset = serde_json::from_str("\"emacs\"").unwrap();
        assert_eq!(preset, KeymapPreset::Emacs);
    }
}
