//! Border and input styles derived from the active theme.

use crate::styles::theme;
use ratatui::prelude::*;

pub fn focused_border_style() -> Style {
    theme().border_focused_style()
}

pub fn unfocused_border_style() -> Style {
    theme().border_style()
}

pub fn disabled_border_style() -> Style {
    theme().disabled_style()
}

pub fn input_placeholder_style() -> Style {
    theme().muted_style().add_modifier(Modifier::ITALIC)
}

pub fn input_text_style() -> Style {
    theme().text_style()
}

/// Border style for a pane that may or may not own the keyboard.
pub fn pane_border_style(focused: bool) -> Style {
    if focused {
        focused_border_style()
    } else {
        unfocused_border_style()
    }
}
