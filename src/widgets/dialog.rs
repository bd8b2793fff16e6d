//! Centered confirmation dialog drawn over the current screen.

use crate::styles::theme;
use crate::utils::center_fixed;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogVariant {
    #[default]
    Default,
    Warning,
    Error,
}

pub struct Dialog<'a> {
    title: &'a str,
    content: &'a str,
    footer: Option<&'a str>,
    variant: DialogVariant,
    width: u16,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            footer: None,
            variant: DialogVariant::Default,
            width: 56,
        }
    }

    pub fn variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Key hints shown on the bottom border, e.g. "y: Yes | n: No"
    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    fn height(&self) -> u16 {
        let inner = self.width.saturating_sub(6).max(1) as usize;
        let lines: usize = self
            .content
            .lines()
            .map(|l| l.chars().count().div_ceil(inner).max(1))
            .sum();
        lines as u16 + 4
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let popup = center_fixed(area, self.width, self.height());
        Clear.render(popup, buf);

        let border = match self.variant {
            DialogVariant::Default => t.border_focused_style(),
            DialogVariant::Warning => t.warning_style(),
            DialogVariant::Error => t.error_style(),
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(format!(" {} ", self.title))
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(Padding::new(2, 2, 1, 0))
            .style(Style::default().bg(t.background));
        if let Some(footer) = self.footer {
            block = block.title_bottom(Line::styled(format!(" {} ", footer), t.muted_style()).centered());
        }

        Paragraph::new(self.content)
            .style(t.text_style())
            .wrap(Wrap { trim: true })
            .block(block)
            .render(popup, buf);
    }
}
