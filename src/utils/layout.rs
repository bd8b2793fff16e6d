use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header, content and footer rows; content takes whatever is left.
pub fn create_standard_layout(area: Rect, header_height: u16, footer_height: u16) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Fixed-size popup, shrunk to fit small terminals.
pub fn center_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
