//! Bordered single-line input rendering a [`TextInput`].

use crate::styles::theme;
use crate::utils::{
    disabled_border_style, focused_border_style, input_placeholder_style, input_text_style,
    unfocused_border_style, TextInput,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    /// Shown under the title in the error color, e.g. "Required"
    hint: Option<&'a str>,
    focused: bool,
    disabled: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            hint: None,
            focused: false,
            disabled: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn border_style(&self) -> Style {
        if self.disabled {
            disabled_border_style()
        } else if self.focused {
            focused_border_style()
        } else {
            unfocused_border_style()
        }
    }

    fn block(&self) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        if let Some(hint) = self.hint {
            block = block.title_bottom(Line::styled(format!(" {} ", hint), theme().error_style()));
        }
        block
    }

    /// First visible char so the cursor stays inside `width`.
    fn scroll_offset(&self, width: u16) -> usize {
        let width = width.max(1) as usize;
        self.input.cursor().saturating_sub(width - 1)
    }

    fn visible_text(&self, width: u16) -> (String, Style) {
        if self.input.text().is_empty() {
            let style = if self.disabled {
                theme().disabled_style()
            } else {
                input_placeholder_style()
            };
            return (self.placeholder.unwrap_or("").to_string(), style);
        }
        let text = self
            .input
            .text()
            .chars()
            .skip(self.scroll_offset(width))
            .collect();
        let style = if self.disabled {
            theme().disabled_style()
        } else {
            input_text_style()
        };
        (text, style)
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        let (text, style) = self.visible_text(inner.width);
        Paragraph::new(text).style(style).block(block).render(area, buf);
    }
}

/// Frame helper that also places the terminal cursor.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let inner = widget.block().inner(area);
        let show_cursor = widget.focused && !widget.disabled;
        let column = widget.input.cursor() - widget.scroll_offset(inner.width);

        self.render_widget(widget, area);

        if show_cursor && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (column as u16).min(inner.width - 1);
            self.set_cursor_position((x, inner.y));
        }
    }
}
