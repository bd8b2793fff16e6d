use crate::session::Customer;
use crate::styles::theme;
use crate::utils::format;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

const BRAND: &str = "✂  barbershop";

/// Common header for all screens: brand on the left, screen description in
/// the middle, signed-in customer on the right.
pub struct Header;

impl Header {
    /// Returns the height used.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        description: &str,
        customer: Option<&Customer>,
    ) -> u16 {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" {} ", title))
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [brand_area, desc_area, customer_area] = Layout::horizontal([
            Constraint::Length(BRAND.chars().count() as u16 + 3),
            Constraint::Min(0),
            Constraint::Length(28),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(BRAND).style(t.title_style()),
            brand_area,
        );

        let top_padding = desc_area
            .height
            .saturating_sub(description.lines().count() as u16)
            / 2;
        let [_, desc_area] =
            Layout::vertical([Constraint::Length(top_padding), Constraint::Min(0)]).areas(desc_area);
        frame.render_widget(
            Paragraph::new(description)
                .style(t.text_style())
                .wrap(Wrap { trim: true }),
            desc_area,
        );

        let who = match customer {
            Some(c) => vec![
                Line::styled(c.name.clone(), t.emphasis_style()),
                Line::styled(format::phone(&c.contact), t.muted_style()),
            ],
            None => vec![Line::styled("Guest", t.muted_style())],
        };
        frame.render_widget(Paragraph::new(who).alignment(Alignment::Right), customer_area);

        area.height
    }
}
