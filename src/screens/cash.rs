//! Cash dashboard.
//!
//! Overall figures on top, and below them one day's appointments split by
//! stage. Day summaries use the same key-guarded query as slot availability,
//! so a late answer for a day the user already left is dropped.

use crate::api::models::{BookingStage, CashOverview, DailySummary};
use crate::api::{ApiRequest, ApiResponse};
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::remote::{KeyedQuery, Remote, Resolution};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::Screen as ScreenId;
use crate::utils::{create_standard_layout, format};
use anyhow::Result;
use chrono::{Days, NaiveDate};
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};
use tracing::debug;

/// Split `width` cells between stages in proportion to their counts.
///
/// Uses largest remainders so the segments always add up to `width` when
/// there is at least one appointment.
pub fn bar_segments(summary: &DailySummary, width: u16) -> Vec<(BookingStage, u16)> {
    let total = summary.total();
    if total <= 0 || width == 0 {
        return Vec::new();
    }
    let width = i64::from(width);
    let mut segments: Vec<(BookingStage, i64, i64)> = BookingStage::ALL
        .iter()
        .map(|stage| {
            let share = summary.count(*stage) * width;
            (*stage, share / total, share % total)
        })
        .collect();

    let assigned: i64 = segments.iter().map(|(_, cells, _)| cells).sum();
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by(|a, b| segments[*b].2.cmp(&segments[*a].2));
    for index in order.into_iter().take((width - assigned) as usize) {
        segments[index].1 += 1;
    }

    segments
        .into_iter()
        .filter(|(_, cells, _)| *cells > 0)
        .map(|(stage, cells, _)| (stage, cells as u16))
        .collect()
}

pub struct CashScreen {
    overview: Remote<CashOverview>,
    day: NaiveDate,
    daily: KeyedQuery<NaiveDate, DailySummary>,
}

impl CashScreen {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            overview: Remote::Idle,
            day: today,
            daily: KeyedQuery::Idle,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    fn load_day(&mut self, day: NaiveDate) -> ScreenAction {
        self.day = day;
        self.daily.begin(day);
        ScreenAction::Request(ApiRequest::DailySummary(day))
    }

    fn reload(&mut self) -> ScreenAction {
        self.overview = Remote::Loading;
        ScreenAction::Request(ApiRequest::CashOverview).and(self.load_day(self.day))
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let overview = match &self.overview {
            Remote::Ready(overview) => overview,
            Remote::Failed(e) => {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::styled(format!("Could not load cash figures: {}", e), t.error_style()),
                        Line::styled("Press r to try again.", t.emphasis_style()),
                    ])
                    .block(card_block("Overview")),
                    area,
                );
                return;
            }
            Remote::Idle | Remote::Loading => {
                frame.render_widget(
                    Paragraph::new(Line::styled("Loading…", t.muted_style())).block(card_block("Overview")),
                    area,
                );
                return;
            }
        };

        let best_seller = match &overview.best_seller {
            Some(best) => vec![
                Line::styled(best.description.clone(), t.emphasis_style()),
                Line::styled(
                    format!(
                        "{} sold · {} of sales · {}",
                        best.sales,
                        format::percent(best.share_percent),
                        format::money(best.price)
                    ),
                    t.muted_style(),
                ),
            ],
            None => vec![Line::styled("No sales yet", t.muted_style())],
        };

        let cards: [(&str, Vec<Line>); 6] = [
            ("Total revenue", metric(format::money(overview.total_revenue))),
            ("Appointments", metric(overview.total_appointments.to_string())),
            ("Today", metric(overview.appointments_today.to_string())),
            ("Average ticket", metric(format::money(overview.average_ticket))),
            ("Cancellation rate", metric(format::percent(overview.cancellation_rate))),
            ("Best seller", best_seller),
        ];

        let rows = Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(area);
        let mut cards = cards.into_iter();
        for row in rows.iter() {
            let cells = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(*row);
            for cell in cells.iter() {
                if let Some((title, lines)) = cards.next() {
                    frame.render_widget(Paragraph::new(lines).block(card_block(title)), *cell);
                }
            }
        }
    }

    fn render_daily(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(format!(" ◀ {} ▶ ", format::date_long(self.day)))
            .title_style(t.title_style())
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let summary = match self.daily.value_for(&self.day) {
            Some(summary) => summary,
            None => {
                let line = match self.daily.error() {
                    Some(e) => Line::styled(format!("Could not load this day: {}", e), t.error_style()),
                    None => Line::styled("Loading…", t.muted_style()),
                };
                frame.render_widget(Paragraph::new(line), inner);
                return;
            }
        };

        let total = summary.total();
        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{} appointment(s)", total), t.emphasis_style()),
        ])];

        if total > 0 {
            let bar: Vec<Span> = bar_segments(summary, inner.width)
                .into_iter()
                .map(|(stage, cells)| {
                    Span::styled(
                        "█".repeat(cells as usize),
                        Style::default().fg(t.stage_color(stage)),
                    )
                })
                .collect();
            lines.push(Line::raw(""));
            lines.push(Line::from(bar));
        }
        lines.push(Line::raw(""));

        for stage in BookingStage::ALL {
            let count = summary.count(stage);
            let share = if total > 0 {
                count as f64 * 100.0 / total as f64
            } else {
                0.0
            };
            lines.push(Line::from(vec![
                Span::styled("■ ", t.stage_style(stage)),
                Span::styled(format!("{:<12}", stage.label()), t.text_style()),
                Span::styled(format!("{:>4}", count), t.emphasis_style()),
                Span::styled(format!("   {}", format::percent(share)), t.muted_style()),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn card_block(title: &str) -> Block<'static> {
    let t = theme();
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.border_style())
        .title(format!(" {} ", title))
        .title_style(t.muted_style())
        .padding(Padding::horizontal(1))
}

fn metric(value: String) -> Vec<Line<'static>> {
    vec![Line::styled(value, theme().emphasis_style())]
}

impl Screen for CashScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header_chunk, content_chunk, footer_chunk) = create_standard_layout(area, 4, 2);
        Header::render(
            frame,
            header_chunk,
            ScreenId::Cash.title(),
            ScreenId::Cash.description(),
            ctx.session.customer(),
        );

        let [metrics_area, daily_area] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(content_chunk);
        self.render_metrics(frame, metrics_area);
        self.render_daily(frame, daily_area);

        let footer = ctx.config.keymap.footer(&[
            Action::MoveLeft,
            Action::MoveRight,
            Action::GoToTop,
            Action::Refresh,
            Action::Cancel,
        ]);
        Footer::render(frame, footer_chunk, &footer);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        let Some(action) = ctx.config.keymap.get_action(key.code, key.modifiers) else {
            return Ok(ScreenAction::None);
        };
        let target = match action {
            Action::Cancel | Action::Quit => return Ok(ScreenAction::Navigate(ScreenId::MainMenu)),
            Action::Refresh => return Ok(self.reload()),
            Action::MoveLeft => self.day.checked_sub_days(Days::new(1)),
            Action::MoveRight => self.day.checked_add_days(Days::new(1)),
            Action::PageUp => self.day.checked_sub_days(Days::new(7)),
            Action::PageDown => self.day.checked_add_days(Days::new(7)),
            Action::GoToTop | Action::Home => Some(ctx.today),
            _ => None,
        };
        Ok(match target {
            Some(day) if day != self.day => self.load_day(day),
            _ => ScreenAction::None,
        })
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match response {
            ApiResponse::CashOverview(result) => {
                let action = match &result {
                    Err(e) => ScreenAction::error(format!("Could not load cash figures: {}", e)),
                    Ok(_) => ScreenAction::None,
                };
                self.overview.resolve(result);
                Ok(action)
            }
            ApiResponse::DailySummary { date, result } => {
                let error = result.as_ref().err().cloned();
                match (self.daily.resolve(&date, result), error) {
                    (Resolution::Stale, _) => {
                        debug!("Discarding stale daily summary for {}", date);
                        Ok(ScreenAction::None)
                    }
                    (Resolution::Applied, Some(e)) => Ok(ScreenAction::error(format!(
                        "Could not load {}: {}",
                        format::date(date),
                        e
                    ))),
                    (Resolution::Applied, None) => Ok(ScreenAction::None),
                }
            }
            _ => Ok(ScreenAction::None),
        }
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(self.reload())
    }
}
