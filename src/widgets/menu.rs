//! Card-style menu: each entry is three rows tall with a title line and a
//! muted description line.

use crate::styles::theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

const CARD_HEIGHT: u16 = 3;

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub icon: String,
    pub text: String,
    pub description: String,
    pub color: Color,
    pub enabled: bool,
    /// Right-hand badge such as a count
    pub info: Option<String>,
}

impl MenuItem {
    pub fn new(icon: impl Into<String>, text: impl Into<String>, color: Color) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
            description: String::new(),
            color,
            enabled: true,
            info: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct MenuState {
    selected: Option<usize>,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: Some(0) }
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Move to the next enabled item, wrapping.
    pub fn next(&mut self, items: &[MenuItem]) {
        self.step(items, 1);
    }

    pub fn previous(&mut self, items: &[MenuItem]) {
        self.step(items, items.len().saturating_sub(1));
    }

    fn step(&mut self, items: &[MenuItem], stride: usize) {
        let len = items.len();
        if len == 0 {
            return;
        }
        let mut index = self.selected.unwrap_or(0);
        for _ in 0..len {
            index = (index + stride) % len;
            if items[index].enabled {
                self.selected = Some(index);
                return;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Rows needed to show every card.
    pub fn height(&self) -> u16 {
        self.items.len() as u16 * CARD_HEIGHT
    }

    /// Card rectangles for mouse hit-testing.
    pub fn clickable_areas(&self, area: Rect) -> Vec<(Rect, usize)> {
        (0..self.items.len())
            .map(|i| (i, area.y + i as u16 * CARD_HEIGHT))
            .take_while(|(_, y)| y + CARD_HEIGHT <= area.y + area.height)
            .map(|(i, y)| (Rect::new(area.x, y, area.width, CARD_HEIGHT), i))
            .collect()
    }
}

fn fill(spans: &mut Vec<Span<'_>>, width: u16, style: Style) {
    let used: usize = spans.iter().map(|s| s.width()).sum();
    if used < width as usize {
        spans.push(Span::styled(" ".repeat(width as usize - used), style));
    }
}

impl StatefulWidget for Menu {
    type State = MenuState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let t = theme();

        for (card, index) in self.clickable_areas(area) {
            let item = &self.items[index];
            let selected = state.selected == Some(index);
            let bg = if selected { t.highlight_bg } else { t.background };
            let base = Style::default().bg(bg);
            let fg = if item.enabled { item.color } else { t.text_muted };
            let marker = Span::styled(
                if selected { "▌ " } else { "  " },
                base.fg(t.border_focused),
            );

            let mut title = vec![
                marker.clone(),
                Span::styled(format!("{} ", item.icon), base.fg(fg)),
                Span::styled(item.text.clone(), base.fg(fg).add_modifier(Modifier::BOLD)),
            ];
            if let Some(info) = &item.info {
                title.push(Span::styled(format!("  {}", info), base.fg(t.text_emphasis)));
            }
            fill(&mut title, card.width, base);

            let mut description = vec![
                marker,
                Span::styled(format!("  {}", item.description), base.fg(t.text_muted)),
            ];
            fill(&mut description, card.width, base);

            let mut blank = Vec::new();
            fill(&mut blank, card.width, base);

            Line::from(title).render(Rect::new(card.x, card.y, card.width, 1), buf);
            Line::from(description).render(Rect::new(card.x, card.y + 1, card.width, 1), buf);
            Line::from(blank).render(Rect::new(card.x, card.y + 2, card.width, 1), buf);
        }
    }
}
