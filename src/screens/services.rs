//! Services screen: what the shop offers and for how much.
//!
//! The customer-facing price list. Retired services are left out; Enter
//! starts a booking.

use crate::api::models::Service;
use crate::api::{ApiRequest, ApiResponse};
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::remote::Remote;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Screen as ScreenId;
use crate::utils::{create_standard_layout, format, ListStateExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState};

/// Services a customer can book, in catalog order.
pub fn offered(services: Vec<Service>) -> Vec<Service> {
    services.into_iter().filter(Service::is_active).collect()
}

pub struct ServicesScreen {
    services: Remote<Vec<Service>>,
    table: TableState,
}

impl ServicesScreen {
    pub fn new() -> Self {
        Self {
            services: Remote::Idle,
            table: TableState::default(),
        }
    }

    pub fn services(&self) -> &[Service] {
        self.services.value().map_or(&[], Vec::as_slice)
    }

    pub fn selected(&self) -> Option<&Service> {
        self.table.selected().and_then(|i| self.services().get(i))
    }

    fn reload(&mut self) -> ScreenAction {
        self.services = Remote::Loading;
        ScreenAction::Request(ApiRequest::ListServices)
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(" Services ")
            .title_style(t.title_style());

        let message = match &self.services {
            Remote::Failed(e) => Some(vec![
                Line::styled(format!("Could not load services: {}", e), t.error_style()),
                Line::styled("Press r to try again.", t.emphasis_style()),
            ]),
            Remote::Idle | Remote::Loading => Some(vec![Line::styled("Loading…", t.muted_style())]),
            Remote::Ready(services) if services.is_empty() => Some(vec![Line::styled(
                "No services on offer right now.",
                t.muted_style(),
            )]),
            Remote::Ready(_) => None,
        };
        if let Some(lines) = message {
            frame.render_widget(
                Paragraph::new(lines).block(block.padding(Padding::uniform(1))),
                area,
            );
            return;
        }

        let rows: Vec<Row> = self
            .services()
            .iter()
            .map(|s| {
                Row::new(vec![
                    Cell::from(s.description.clone()),
                    Cell::from(Line::from(format::money(s.price)).alignment(Alignment::Right)),
                ])
            })
            .collect();
        let header = Row::new(
            ["Service", "Price"]
                .into_iter()
                .map(|h| Cell::from(h).style(t.emphasis_style())),
        );
        let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(14)])
            .header(header)
            .block(block)
            .row_highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(table, area, &mut self.table);
    }
}

impl Default for ServicesScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ServicesScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header_chunk, content_chunk, footer_chunk) = create_standard_layout(area, 4, 2);
        Header::render(
            frame,
            header_chunk,
            ScreenId::Services.title(),
            ScreenId::Services.description(),
            ctx.session.customer(),
        );
        self.render_list(frame, content_chunk);

        let footer = ctx
            .config
            .keymap
            .footer(&[Action::Confirm, Action::Refresh, Action::Cancel]);
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
        let total = self.services().len();
        Ok(match action {
            Action::Cancel | Action::Quit => ScreenAction::Navigate(ScreenId::MainMenu),
            Action::Refresh => self.reload(),
            Action::Confirm if total > 0 => ScreenAction::Navigate(ScreenId::Booking),
            other => {
                self.table.navigate(other, total);
                ScreenAction::None
            }
        })
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let ApiResponse::Services(result) = response else {
            return Ok(ScreenAction::None);
        };
        let action = match &result {
            Err(e) => ScreenAction::error(format!("Could not load services: {}", e)),
            Ok(_) => ScreenAction::None,
        };
        self.services.resolve(result.map(offered));
        self.table.clamp_to(self.services().len());
        Ok(action)
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(self.reload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn service(id: i64, description: &str, price: f64, retired: bool) -> Service {
        Service {
            id,
            description: description.to_string(),
            price,
            deleted_at: retired.then(|| "2026-03-01T09:00:00Z".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_retired_services_are_hidden() {
        let config = Config::default();
        let session = Session::anonymous();
        let ctx = ScreenContext::new(&config, &session, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut screen = ServicesScreen::new();

        assert!(matches!(
            screen.on_enter(&ctx).unwrap(),
            ScreenAction::Request(ApiRequest::ListServices)
        ));
        screen
            .on_response(
                ApiResponse::Services(Ok(vec![
                    service(1, "Corte", 30.0, false),
                    service(3, "Pigmentação", 45.0, true),
                    service(2, "Barba", 25.0, false),
                ])),
                &ctx,
            )
            .unwrap();

        let names: Vec<&str> = screen.services().iter().map(|s| s.description.as_str()).collect();
        assert_eq!(names, vec!["Corte", "Barba"]);
        assert_eq!(screen.selected().map(|s| s.id), Some(1));

        screen.handle_event(press(KeyCode::Down), &ctx).unwrap();
        assert_eq!(screen.selected().map(|s| s.id), Some(2));
        assert!(matches!(
            screen.handle_event(press(KeyCode::Enter), &ctx).unwrap(),
            ScreenAction::Navigate(ScreenId::Booking)
        ));
    }

    #[test]
    fn test_failed_load_toasts_and_refresh_retries() {
        let config = Config::default();
        let session = Session::anonymous();
        let ctx = ScreenContext::new(&config, &session, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut screen = ServicesScreen::new();
        screen.on_enter(&ctx).unwrap();

        let action = screen
            .on_response(ApiResponse::Services(Err("connection refused".to_string())), &ctx)
            .unwrap();
        assert!(matches!(action, ScreenAction::Toast(_)));
        // Nothing to book from an empty list
        assert!(screen.handle_event(press(KeyCode::Enter), &ctx).unwrap().is_none());

        assert!(matches!(
            screen.handle_event(press(KeyCode::Char('r')), &ctx).unwrap(),
            ScreenAction::Request(ApiRequest::ListServices)
        ));
    }
}
