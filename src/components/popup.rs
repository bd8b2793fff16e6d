//! Popup frame for forms and pickers drawn over a screen.
//!
//! Unlike [`crate::widgets::Dialog`], which only shows text, a popup hands
//! back the area inside its border so the caller can lay out its own fields.

use crate::components::footer::Footer;
use crate::styles::theme;
use crate::utils::center_fixed;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding};

/// Areas produced by [`Popup::render`].
#[derive(Debug, Clone, Copy)]
pub struct PopupAreas {
    /// Whole popup including the border
    pub outer: Rect,
    /// Space for the caller's widgets
    pub content: Rect,
}

pub struct Popup<'a> {
    width: u16,
    height: u16,
    title: Option<String>,
    footer: Option<&'a str>,
    dim_background: bool,
}

impl<'a> Popup<'a> {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            title: None,
            footer: None,
            dim_background: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Key hints on the last two rows inside the border.
    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn dim_background(mut self, dim: bool) -> Self {
        self.dim_background = dim;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) -> PopupAreas {
        let t = theme();
        let outer = center_fixed(area, self.width, self.height);

        if self.dim_background {
            frame.render_widget(Block::default().style(t.muted_style()), area);
        }
        frame.render_widget(Clear, outer);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(t.border_focused_style())
            .padding(Padding::horizontal(1));
        if let Some(title) = &self.title {
            block = block
                .title(format!(" {} ", title))
                .title_style(t.title_style())
                .title_alignment(Alignment::Center);
        }
        let inner = block.inner(outer);
        frame.render_widget(block, outer);

        let content = match self.footer {
            Some(footer) => {
                let [content, footer_area] =
                    Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);
                Footer::render(frame, footer_area, footer);
                content
            }
            None => inner,
        };

        PopupAreas { outer, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_content_area_excludes_border_and_footer() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut areas = None;
        terminal
            .draw(|frame| {
                areas = Some(
                    Popup::new(40, 12)
                        .title("Edit")
                        .footer("Enter: Save")
                        .render(frame, frame.area()),
                );
            })
            .unwrap();
        let areas = areas.unwrap();
        assert_eq!(areas.outer, Rect::new(20, 6, 40, 12));
        // Border (2) + padding (2) wide; border (2) + footer (2) tall
        assert_eq!(areas.content.width, 36);
        assert_eq!(areas.content.height, 8);
    }
}
