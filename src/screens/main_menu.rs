//! Main menu screen controller.
//!
//! Entry point of the TUI: a card menu on the left, a short explanation of
//! the highlighted entry on the right.

use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::Screen as ScreenId;
use crate::utils::create_standard_layout;
use crate::widgets::{Menu, MenuItem as MenuWidgetItem, MenuState};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use indoc::indoc;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Book,
    Services,
    Appointments,
    Catalog,
    Cash,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Book,
        MenuItem::Services,
        MenuItem::Appointments,
        MenuItem::Catalog,
        MenuItem::Cash,
        MenuItem::Quit,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            MenuItem::Book => "✂",
            MenuItem::Services => "★",
            MenuItem::Appointments => "☰",
            MenuItem::Catalog => "✎",
            MenuItem::Cash => "$",
            MenuItem::Quit => "⏻",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            MenuItem::Book => "Book an appointment",
            MenuItem::Services => "Services & prices",
            MenuItem::Appointments => "Appointments",
            MenuItem::Catalog => "Barbers, services & slots",
            MenuItem::Cash => "Cash",
            MenuItem::Quit => "Quit",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            MenuItem::Book => "Step-by-step booking",
            MenuItem::Services => "What we offer",
            MenuItem::Appointments => "Stages, filters, cancellations",
            MenuItem::Catalog => "Create, edit, (de)activate",
            MenuItem::Cash => "Revenue and daily breakdown",
            MenuItem::Quit => "Leave the app",
        }
    }

    fn color(&self) -> Color {
        let t = theme();
        match self {
            MenuItem::Book => t.primary,
            MenuItem::Services => t.warning,
            MenuItem::Appointments => t.secondary,
            MenuItem::Catalog => t.info,
            MenuItem::Cash => t.success,
            MenuItem::Quit => t.text_muted,
        }
    }

    fn explanation(&self) -> Vec<Line<'static>> {
        let t = theme();
        let body = match self {
            MenuItem::Book => indoc! {"
                Walks you through contact, barber, service, day and time.

                Only the selected barber's services are offered, and only
                slots that are still free on the chosen day can be picked.
                Your saved profile fills in contact and name for you."},
            MenuItem::Services => indoc! {"
                Every service the shop currently offers, with its price.

                Press Enter on the list to start booking."},
            MenuItem::Appointments => indoc! {"
                Every booking with client, barber, service, day and price.

                Move a booking through Pending, Confirmed and Completed,
                cancel it, or filter the list by stage or client name."},
            MenuItem::Catalog => indoc! {"
                Manage what the shop offers.

                Three tabs: barbers, services and time slots. Inactive
                entries stay listed and can be reactivated at any time."},
            MenuItem::Cash => indoc! {"
                Total revenue, number of bookings, average ticket,
                cancellation rate and the best-selling service.

                Browse day by day to see how bookings split across stages."},
            MenuItem::Quit => "Close the application.",
        };
        let mut lines = vec![
            Line::styled(self.text(), t.title_style()),
            Line::raw(""),
        ];
        lines.extend(body.lines().map(|l| Line::styled(l, t.text_style())));
        lines
    }

    fn target(&self) -> Option<ScreenId> {
        match self {
            MenuItem::Book => Some(ScreenId::Booking),
            MenuItem::Services => Some(ScreenId::Services),
            MenuItem::Appointments => Some(ScreenId::Appointments),
            MenuItem::Catalog => Some(ScreenId::Catalog),
            MenuItem::Cash => Some(ScreenId::Cash),
            MenuItem::Quit => None,
        }
    }
}

pub struct MainMenuScreen {
    menu_state: MenuState,
    clickable_areas: Vec<(Rect, usize)>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self {
            menu_state: MenuState::new(),
            clickable_areas: Vec::new(),
        }
    }

    fn widget_items() -> Vec<MenuWidgetItem> {
        MenuItem::ALL
            .iter()
            .map(|item| {
                MenuWidgetItem::new(item.icon(), item.text(), item.color())
                    .description(item.subtitle())
            })
            .collect()
    }

    pub fn selected_item(&self) -> MenuItem {
        self.menu_state
            .selected()
            .and_then(|i| MenuItem::ALL.get(i).copied())
            .unwrap_or(MenuItem::Book)
    }

    fn activate(&self) -> ScreenAction {
        match self.selected_item().target() {
            Some(screen) => ScreenAction::Navigate(screen),
            None => ScreenAction::Quit,
        }
    }

    fn handle_mouse(&mut self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        let items = Self::widget_items();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .clickable_areas
                    .iter()
                    .find(|(rect, _)| rect.contains(Position::new(mouse.column, mouse.row)))
                    .map(|(_, index)| *index);
                if let Some(index) = hit {
                    self.menu_state.select(Some(index));
                    return true;
                }
            }
            MouseEventKind::ScrollUp => self.menu_state.previous(&items),
            MouseEventKind::ScrollDown => self.menu_state.next(&items),
            _ => {}
        }
        false
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header_chunk, content_chunk, footer_chunk) = create_standard_layout(area, 4, 2);

        Header::render(
            frame,
            header_chunk,
            ScreenId::MainMenu.title(),
            ScreenId::MainMenu.description(),
            ctx.session.customer(),
        );

        let [menu_area, explanation_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(content_chunk);

        let menu_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .padding(Padding::vertical(1));
        let menu_inner = menu_block.inner(menu_area);
        frame.render_widget(menu_block, menu_area);

        let menu = Menu::new(Self::widget_items());
        self.clickable_areas = menu.clickable_areas(menu_inner);
        frame.render_stateful_widget(menu, menu_inner, &mut self.menu_state);

        let explanation = Paragraph::new(self.selected_item().explanation())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .padding(Padding::uniform(1)),
            );
        frame.render_widget(explanation, explanation_area);

        let keymap = &ctx.config.keymap;
        Footer::render(
            frame,
            footer_chunk,
            &keymap.footer(&[Action::Confirm, Action::Quit]),
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return Ok(ScreenAction::None);
            }
            let items = Self::widget_items();
            match ctx.config.keymap.get_action(key.code, key.modifiers) {
                Some(Action::MoveUp) => self.menu_state.previous(&items),
                Some(Action::MoveDown) => self.menu_state.next(&items),
                Some(Action::GoToTop) => self.menu_state.select(Some(0)),
                Some(Action::GoToEnd) => self.menu_state.select(Some(items.len() - 1)),
                Some(Action::Confirm) => return Ok(self.activate()),
                Some(Action::Quit | Action::Cancel) => return Ok(ScreenAction::Quit),
                _ => {}
            }
            return Ok(ScreenAction::None);
        }

        if self.handle_mouse(&event) {
            return Ok(self.activate());
        }
        Ok(ScreenAction::None)
    }
}
