use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key-hint footer. Text is `"key: label | key: label"`.
pub struct Footer;

impl Footer {
    pub fn spans(text: &str) -> Vec<Span<'_>> {
        let t = theme();
        let mut spans = Vec::new();
        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            match part.split_once(": ") {
                Some((keys, label)) => {
                    spans.push(Span::styled(keys, t.emphasis_style()));
                    spans.push(Span::styled(format!(": {}", label), t.text_style()));
                }
                None => spans.push(Span::styled(part, t.text_style())),
            }
        }
        spans
    }

    /// Returns the height used (border plus one line).
    pub fn render(frame: &mut Frame, area: Rect, text: &str) -> u16 {
        let t = theme();
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::from(Self::spans(text))).alignment(Alignment::Center),
            inner,
        );
        2
    }
}
