//! Month calendar for picking a booking day.
//!
//! Days before `min` are drawn dimmed and the cursor can't land on them.

use crate::keymap::Action;
use crate::styles::theme;
use chrono::{Datelike, Days, Months, NaiveDate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
/// Two-char day plus a space on each side
const CELL_WIDTH: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    cursor: NaiveDate,
    min: NaiveDate,
}

impl DatePicker {
    /// Cursor starts on `min` (normally today).
    pub fn new(min: NaiveDate) -> Self {
        Self { cursor: min, min }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    /// Move the cursor, clamped to `min`.
    pub fn set_cursor(&mut self, date: NaiveDate) {
        self.cursor = date.max(self.min);
    }

    fn shift_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days as u64))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.set_cursor(date);
        }
    }

    fn shift_months(&mut self, months: i32) {
        let moved = if months >= 0 {
            self.cursor.checked_add_months(Months::new(months as u32))
        } else {
            self.cursor.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.set_cursor(date);
        }
    }

    /// ←/→ by day, ↑/↓ by week, PgUp/PgDn by month.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.shift_days(-1),
            Action::MoveRight => self.shift_days(1),
            Action::MoveUp => self.shift_days(-7),
            Action::MoveDown => self.shift_days(7),
            Action::PageUp => self.shift_months(-1),
            Action::PageDown => self.shift_months(1),
            Action::GoToTop | Action::Home => self.cursor = self.min,
            _ => return false,
        }
        true
    }

    /// Weeks of the cursor's month, Sunday first; `None` pads the edges.
    pub fn month_grid(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let Some(first) = self.cursor.with_day(1) else {
            return Vec::new();
        };
        let lead = first.weekday().num_days_from_sunday() as usize;
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut slot = lead;
        let mut day = Some(first);

        while let Some(date) = day.filter(|d| d.month() == first.month()) {
            week[slot] = Some(date);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
            day = date.succ_opt();
        }
        if slot > 0 {
            weeks.push(week);
        }
        weeks
    }
}

pub struct DatePickerWidget<'a> {
    picker: &'a DatePicker,
    selected: Option<NaiveDate>,
    focused: bool,
}

impl<'a> DatePickerWidget<'a> {
    pub fn new(picker: &'a DatePicker) -> Self {
        Self {
            picker,
            selected: None,
            focused: true,
        }
    }

    /// The date already committed to the booking, marked differently from the cursor.
    pub fn selected(mut self, selected: Option<NaiveDate>) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Width the grid needs inside its border.
    pub const fn inner_width() -> u16 {
        CELL_WIDTH * 7
    }

    fn day_style(&self, date: NaiveDate) -> Style {
        let t = theme();
        if date < self.picker.min {
            return t.disabled_style();
        }
        let mut style = t.text_style();
        if self.selected == Some(date) {
            style = t.success_style();
        }
        if date == self.picker.min {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if date == self.picker.cursor && self.focused {
            style = t.highlight_style();
        }
        style
    }
}

impl Widget for DatePickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let cursor = self.picker.cursor;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                t.border_focused_style()
            } else {
                t.border_style()
            })
            .title(format!(" {} ", cursor.format("%B %Y")))
            .title_alignment(Alignment::Center);

        let mut lines = vec![Line::from(
            WEEKDAYS
                .iter()
                .map(|d| Span::styled(format!(" {} ", d), t.muted_style()))
                .collect::<Vec<_>>(),
        )];
        for week in self.picker.month_grid() {
            let spans: Vec<Span> = week
                .iter()
                .map(|day| match day {
                    Some(date) => Span::styled(format!(" {:>2} ", date.day()), self.day_style(*date)),
                    None => Span::raw("    "),
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
