//! Catalog screen: barbers, services and time slots.
//!
//! The three lists are loaded together. Entries are never deleted, only
//! deactivated, so inactive rows stay visible and can be switched back on.

use crate::api::client::Resource;
use crate::api::models::Id;
use crate::api::{ApiRequest, ApiResponse, Catalog};
use crate::components::{Footer, Header, Popup};
use crate::keymap::Action;
use crate::remote::Remote;
use crate::screens::catalog_form::{
    BarberField, BarberForm, CatalogForm, Choice, ServiceField, ServiceForm, TimeSlotField,
    TimeSlotForm,
};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Screen as ScreenId;
use crate::utils::{create_standard_layout, format, is_typed_char, pane_border_style, ListStateExt, TextInput};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, List, ListItem, ListState, Padding, Paragraph, Row, Table,
    TableState, Tabs,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTab {
    Barbers,
    Services,
    TimeSlots,
}

impl CatalogTab {
    pub const ALL: [CatalogTab; 3] = [CatalogTab::Barbers, CatalogTab::Services, CatalogTab::TimeSlots];

    pub fn title(&self) -> &'static str {
        match self {
            CatalogTab::Barbers => "Barbers",
            CatalogTab::Services => "Services",
            CatalogTab::TimeSlots => "Time slots",
        }
    }

    fn index(&self) -> usize {
        match self {
            CatalogTab::Barbers => 0,
            CatalogTab::Services => 1,
            CatalogTab::TimeSlots => 2,
        }
    }

    fn resource(&self) -> Resource {
        match self {
            CatalogTab::Barbers => Resource::Barbers,
            CatalogTab::Services => Resource::Services,
            CatalogTab::TimeSlots => Resource::TimeSlots,
        }
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Popup state: the form plus the outcome of the last save attempt.
struct Editor {
    form: CatalogForm,
    error: Option<String>,
    saving: bool,
}

pub struct CatalogScreen {
    catalog: Remote<Catalog>,
    tab: CatalogTab,
    tables: [TableState; 3],
    editor: Option<Editor>,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self {
            catalog: Remote::Idle,
            tab: CatalogTab::Barbers,
            tables: Default::default(),
            editor: None,
        }
    }

    pub fn tab(&self) -> CatalogTab {
        self.tab
    }

    fn len(&self, tab: CatalogTab) -> usize {
        self.catalog.value().map_or(0, |c| match tab {
            CatalogTab::Barbers => c.barbers.len(),
            CatalogTab::Services => c.services.len(),
            CatalogTab::TimeSlots => c.time_slots.len(),
        })
    }

    /// Id and active flag of the highlighted row on the current tab.
    fn selected_entry(&self) -> Option<(Id, bool)> {
        let catalog = self.catalog.value()?;
        let index = self.tables[self.tab.index()].selected()?;
        match self.tab {
            CatalogTab::Barbers => catalog.barbers.get(index).map(|b| (b.id, b.is_active())),
            CatalogTab::Services => catalog.services.get(index).map(|s| (s.id, s.is_active())),
            CatalogTab::TimeSlots => catalog.time_slots.get(index).map(|h| (h.id, h.is_active())),
        }
    }

    fn reload(&mut self) -> ScreenAction {
        self.catalog = Remote::Loading;
        ScreenAction::Request(ApiRequest::LoadCatalog)
    }

    fn open_editor(&mut self, edit: bool) {
        let Some(catalog) = self.catalog.value() else {
            return;
        };
        let index = if edit {
            match self.tables[self.tab.index()].selected() {
                Some(i) => Some(i),
                None => return,
            }
        } else {
            None
        };
        let form = match self.tab {
            CatalogTab::Barbers => CatalogForm::Barber(BarberForm::new(
                catalog,
                index.and_then(|i| catalog.barbers.get(i)),
            )),
            CatalogTab::Services => {
                CatalogForm::Service(ServiceForm::new(index.and_then(|i| catalog.services.get(i))))
            }
            CatalogTab::TimeSlots => {
                CatalogForm::TimeSlot(TimeSlotForm::new(index.and_then(|i| catalog.time_slots.get(i))))
            }
        };
        debug!("Opening '{}' form", form.title());
        self.editor = Some(Editor {
            form,
            error: None,
            saving: false,
        });
    }

    fn handle_browse(&mut self, action: Action) -> ScreenAction {
        match action {
            Action::Cancel | Action::Quit => ScreenAction::Navigate(ScreenId::MainMenu),
            Action::NextTab | Action::MoveRight => {
                self.tab = self.tab.next();
                ScreenAction::None
            }
            Action::PrevTab | Action::MoveLeft => {
                self.tab = self.tab.previous();
                ScreenAction::None
            }
            Action::Refresh => self.reload(),
            Action::Create => {
                self.open_editor(false);
                ScreenAction::None
            }
            Action::Edit | Action::Confirm => {
                self.open_editor(true);
                ScreenAction::None
            }
            Action::ToggleActive => match self.selected_entry() {
                Some((id, active)) => {
                    let resource = self.tab.resource();
                    info!("{} {} -> active={}", resource.label(), id, !active);
                    ScreenAction::Request(ApiRequest::SetActive {
                        resource,
                        id,
                        active: !active,
                    })
                }
                None => ScreenAction::None,
            },
            other => {
                let total = self.len(self.tab);
                self.tables[self.tab.index()].navigate(other, total);
                ScreenAction::None
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, action: Option<Action>) -> ScreenAction {
        let Some(editor) = self.editor.as_mut() else {
            return ScreenAction::None;
        };
        if editor.saving {
            return ScreenAction::None;
        }

        if let Some(input) = editor.form.focused_input() {
            let reaches_form = !is_typed_char(key.code, key.modifiers)
                && action.is_some_and(|a| TextInput::is_action_allowed_when_focused(&a));
            if !reaches_form {
                input.handle_key_with_action(key.code, key.modifiers, action);
                editor.error = None;
                return ScreenAction::None;
            }
        }

        let on_list = !editor.form.is_input_focused();
        match action {
            Some(Action::Cancel) => {
                self.editor = None;
                ScreenAction::None
            }
            Some(Action::NextTab) => {
                editor.form.next_field();
                ScreenAction::None
            }
            Some(Action::PrevTab) => {
                editor.form.prev_field();
                ScreenAction::None
            }
            Some(Action::MoveDown) if !on_list => {
                editor.form.next_field();
                ScreenAction::None
            }
            Some(Action::MoveUp) if !on_list => {
                editor.form.prev_field();
                ScreenAction::None
            }
            Some(Action::Confirm) if on_list => {
                editor.form.handle_action(Action::ToggleSelect);
                ScreenAction::None
            }
            Some(Action::Save | Action::Confirm) => match editor.form.submit() {
                Ok(request) => {
                    info!("Saving: {}", request.name());
                    editor.error = None;
                    editor.saving = true;
                    ScreenAction::Request(request)
                }
                Err(e) => {
                    editor.error = Some(e.to_string());
                    ScreenAction::None
                }
            },
            Some(other) => {
                editor.form.handle_action(other);
                ScreenAction::None
            }
            None => ScreenAction::None,
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let titles: Vec<Line> = CatalogTab::ALL
            .iter()
            .map(|tab| {
                let count = self.len(*tab);
                Line::from(format!(" {} ({}) ", tab.title(), count))
            })
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(t.muted_style())
            .highlight_style(t.title_style().add_modifier(Modifier::REVERSED))
            .divider(Span::styled("│", t.border_style()));
        frame.render_widget(tabs, area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(pane_border_style(self.editor.is_none()))
            .title(format!(" {} ", self.tab.title()))
            .title_style(t.title_style());

        let catalog = match &self.catalog {
            Remote::Ready(catalog) => catalog,
            Remote::Failed(e) => {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::styled(format!("Could not load the catalog: {}", e), t.error_style()),
                        Line::styled("Press r to try again.", t.emphasis_style()),
                    ])
                    .block(block.padding(Padding::uniform(1))),
                    area,
                );
                return;
            }
            Remote::Idle | Remote::Loading => {
                frame.render_widget(
                    Paragraph::new(Line::styled("Loading catalog…", t.muted_style()))
                        .block(block.padding(Padding::uniform(1))),
                    area,
                );
                return;
            }
        };

        let status = |active: bool| {
            if active {
                Cell::from("Active").style(t.success_style())
            } else {
                Cell::from("Inactive").style(t.disabled_style())
            }
        };

        let (header, rows, widths): (Vec<&str>, Vec<Row>, Vec<Constraint>) = match self.tab {
            CatalogTab::Barbers => (
                vec!["#", "Name", "Services", "Time slots", "Status"],
                catalog
                    .barbers
                    .iter()
                    .map(|b| {
                        let services: Vec<&str> =
                            b.services.iter().map(|s| s.description.as_str()).collect();
                        Row::new(vec![
                            Cell::from(b.id.to_string()),
                            Cell::from(b.name.clone()),
                            Cell::from(services.join(", ")),
                            Cell::from(b.time_slots.len().to_string()),
                            status(b.is_active()),
                        ])
                    })
                    .collect(),
                vec![
                    Constraint::Length(5),
                    Constraint::Min(14),
                    Constraint::Min(20),
                    Constraint::Length(11),
                    Constraint::Length(9),
                ],
            ),
            CatalogTab::Services => (
                vec!["#", "Description", "Price", "Status"],
                catalog
                    .services
                    .iter()
                    .map(|s| {
                        Row::new(vec![
                            Cell::from(s.id.to_string()),
                            Cell::from(s.description.clone()),
                            Cell::from(format::money(s.price)).style(t.emphasis_style()),
                            status(s.is_active()),
                        ])
                    })
                    .collect(),
                vec![
                    Constraint::Length(5),
                    Constraint::Min(20),
                    Constraint::Length(14),
                    Constraint::Length(9),
                ],
            ),
            CatalogTab::TimeSlots => (
                vec!["#", "Start", "End", "Status"],
                catalog
                    .time_slots
                    .iter()
                    .map(|h| {
                        Row::new(vec![
                            Cell::from(h.id.to_string()),
                            Cell::from(format::hour(&h.start).to_string()),
                            Cell::from(format::hour(&h.end).to_string()),
                            status(h.is_active()),
                        ])
                    })
                    .collect(),
                vec![
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(8),
                    Constraint::Length(9),
                ],
            ),
        };

        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    format!("No {} yet. Press c to add one.", self.tab.title().to_lowercase()),
                    t.muted_style(),
                ))
                .block(block.padding(Padding::uniform(1))),
                area,
            );
            return;
        }

        let header = Row::new(
            header
                .into_iter()
                .map(|h| Cell::from(h).style(t.emphasis_style())),
        );
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(table, area, &mut self.tables[self.tab.index()]);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let t = theme();
        let keymap = &ctx.config.keymap;
        let footer = match &editor.form {
            CatalogForm::Barber(_) => keymap.footer(&[
                Action::NextTab,
                Action::ToggleSelect,
                Action::Save,
                Action::Cancel,
            ]),
            _ => keymap.footer(&[Action::NextTab, Action::Confirm, Action::Cancel]),
        };
        let height = match &editor.form {
            CatalogForm::Barber(_) => 24,
            _ => 14,
        };
        let areas = Popup::new(72, height)
            .title(editor.form.title())
            .footer(&footer)
            .render(frame, area);

        let [message_area, fields_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(areas.content);
        let message = if editor.saving {
            Line::styled("Saving…", t.muted_style())
        } else if let Some(error) = &editor.error {
            Line::styled(error.clone(), t.error_style())
        } else {
            Line::raw("")
        };
        frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), message_area);

        match &mut editor.form {
            CatalogForm::Barber(form) => {
                let [name_area, lists_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(fields_area);
                frame.render_text_input_widget(
                    TextInputWidget::new(&form.name)
                        .title("Name")
                        .placeholder("e.g. João")
                        .focused(form.focus == BarberField::Name),
                    name_area,
                );
                let [services_area, slots_area] =
                    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                        .areas(lists_area);
                render_choices(
                    frame,
                    services_area,
                    "Services",
                    &form.services,
                    &mut form.services_list,
                    form.focus == BarberField::Services,
                );
                render_choices(
                    frame,
                    slots_area,
                    "Time slots",
                    &form.time_slots,
                    &mut form.time_slots_list,
                    form.focus == BarberField::TimeSlots,
                );
            }
            CatalogForm::Service(form) => {
                let [description_area, price_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(fields_area);
                frame.render_text_input_widget(
                    TextInputWidget::new(&form.description)
                        .title("Description")
                        .placeholder("e.g. Corte")
                        .focused(form.focus == ServiceField::Description),
                    description_area,
                );
                frame.render_text_input_widget(
                    TextInputWidget::new(&form.price)
                        .title("Price (R$)")
                        .placeholder("30,00")
                        .focused(form.focus == ServiceField::Price),
                    price_area,
                );
            }
            CatalogForm::TimeSlot(form) => {
                let [start_area, end_area] =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .areas(Layout::vertical([Constraint::Length(3)]).split(fields_area)[0]);
                frame.render_text_input_widget(
                    TextInputWidget::new(&form.start)
                        .title("Start")
                        .placeholder("09:00")
                        .focused(form.focus == TimeSlotField::Start),
                    start_area,
                );
                frame.render_text_input_widget(
                    TextInputWidget::new(&form.end)
                        .title("End")
                        .placeholder("10:00")
                        .focused(form.focus == TimeSlotField::End),
                    end_area,
                );
            }
        }
    }
}

fn render_choices(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    choices: &[Choice],
    state: &mut ListState,
    focused: bool,
) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(pane_border_style(focused))
        .title(format!(" {} ", title));
    if choices.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(format!("No {} registered", title.to_lowercase()), t.muted_style()))
                .block(block),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = choices
        .iter()
        .map(|c| {
            let mark = if c.checked { "[x] " } else { "[ ] " };
            let style = if c.active { t.text_style() } else { t.disabled_style() };
            let mut spans = vec![Span::styled(mark, t.emphasis_style()), Span::styled(c.label.clone(), style)];
            if !c.active {
                spans.push(Span::styled(" (inactive)", t.muted_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let mut list = List::new(items).block(block);
    if focused {
        list = list.highlight_style(t.highlight_style());
    }
    frame.render_stateful_widget(list, area, state);
}

impl Screen for CatalogScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header_chunk, content_chunk, footer_chunk) = create_standard_layout(area, 4, 2);
        Header::render(
            frame,
            header_chunk,
            ScreenId::Catalog.title(),
            ScreenId::Catalog.description(),
            ctx.session.customer(),
        );

        let [tabs_area, table_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(content_chunk);
        self.render_tabs(frame, tabs_area);
        self.render_table(frame, table_area);

        let footer = ctx.config.keymap.footer(&[
            Action::NextTab,
            Action::Create,
            Action::Edit,
            Action::ToggleActive,
            Action::Refresh,
            Action::Cancel,
        ]);
        Footer::render(frame, footer_chunk, &footer);

        self.render_editor(frame, area, ctx);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);
        if self.editor.is_some() {
            return Ok(self.handle_editor_key(key, action));
        }
        Ok(action.map_or(ScreenAction::None, |a| self.handle_browse(a)))
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match response {
            ApiResponse::Catalog(result) => {
                let action = match &result {
                    Err(e) => ScreenAction::error(format!("Could not load the catalog: {}", e)),
                    Ok(_) => ScreenAction::None,
                };
                self.catalog.resolve(result);
                for tab in CatalogTab::ALL {
                    let total = self.len(tab);
                    self.tables[tab.index()].clamp_to(total);
                }
                Ok(action)
            }
            ApiResponse::Saved { what, result } => {
                let from_editor = self.editor.as_ref().is_some_and(|e| e.saving);
                match result {
                    Ok(()) => {
                        let message = if from_editor {
                            self.editor = None;
                            format!("{} saved", what)
                        } else {
                            what
                        };
                        Ok(ScreenAction::success(message).and(self.reload()))
                    }
                    Err(e) => {
                        if let Some(editor) = self.editor.as_mut().filter(|ed| ed.saving) {
                            editor.saving = false;
                            editor.error = Some(e.clone());
                        }
                        Ok(ScreenAction::error(format!("{}: {}", what, e)))
                    }
                }
            }
            _ => Ok(ScreenAction::None),
        }
    }

    fn is_input_focused(&self) -> bool {
        self.editor
            .as_ref()
            .is_some_and(|e| e.form.is_input_focused())
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        self.editor = None;
        Ok(self.reload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Barber, Service, TimeSlot};
    use crate::config::Config;
    use crate::session::Session;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn catalog() -> Catalog {
        let corte = Service {
            id: 10,
            description: "Corte".to_string(),
            price: 30.0,
            deleted_at: None,
            created_at: None,
            updated_at: None,
        };
        Catalog {
            barbers: vec![Barber {
                id: 1,
                name: "João".to_string(),
                image_path: None,
                services: vec![corte.clone()],
                time_slots: Vec::new(),
                deleted_at: None,
                created_at: None,
                updated_at: None,
            }],
            services: vec![corte],
            time_slots: vec![TimeSlot {
                id: 100,
                start: "09:00:00".to_string(),
                end: "10:00:00".to_string(),
                deleted_at: Some("2026-10-01T12:00:00".to_string()),
                created_at: None,
                updated_at: None,
            }],
        }
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn loaded(ctx: &ScreenContext) -> CatalogScreen {
        let mut screen = CatalogScreen::new();
        screen.on_enter(ctx).unwrap();
        screen
            .on_response(ApiResponse::Catalog(Ok(catalog())), ctx)
            .unwrap();
        screen
    }

    #[test]
    fn test_toggle_active_flips_status() {
        let config = Config::default();
        let session = Session::anonymous();
        let ctx = ScreenContext::new(&config, &session, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut screen = loaded(&ctx);

        let action = screen.handle_event(press(KeyCode::Char('a')), &ctx).unwrap();
        assert!(matches!(
            action,
            ScreenAction::Request(ApiRequest::SetActive {
                resource: Resource::Barbers,
                id: 1,
                active: false
            })
        ));

        screen.handle_event(press(KeyCode::Tab), &ctx).unwrap();
        screen.handle_event(press(KeyCode::Tab), &ctx).unwrap();
        assert_eq!(screen.tab(), CatalogTab::TimeSlots);
        let action = screen.handle_event(press(KeyCode::Char('a')), &ctx).unwrap();
        assert!(matches!(
            action,
            ScreenAction::Request(ApiRequest::SetActive {
                resource: Resource::TimeSlots,
                id: 100,
                active: true
            })
        ));
    }

    #[test]
    fn test_create_service_and_close_on_success() {
        let config = Config::default();
        let session = Session::anonymous();
        let ctx = ScreenContext::new(&config, &session, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut screen = loaded(&ctx);
        screen.handle_event(press(KeyCode::Tab), &ctx).unwrap();

        screen.handle_event(press(KeyCode::Char('c')), &ctx).unwrap();
        assert!(screen.is_input_focused());
        for c in "Sobrancelha".chars() {
            screen.handle_event(press(KeyCode::Char(c)), &ctx).unwrap();
        }
        screen.handle_event(press(KeyCode::Tab), &ctx).unwrap();
        for c in "15,5".chars() {
            screen.handle_event(press(KeyCode::Char(c)), &ctx).unwrap();
        }
        let action = screen.handle_event(press(KeyCode::Enter), &ctx).unwrap();
        let ScreenAction::Request(ApiRequest::SaveService(draft)) = action else {
            panic!("expected a save request, got {:?}", action);
        };
        assert_eq!(draft.description, "Sobrancelha");
        assert_eq!(draft.price, 15.5);
        assert_eq!(draft.id, None);

        let action = screen
            .on_response(
                ApiResponse::Saved {
                    what: "Service 'Sobrancelha'".to_string(),
                    result: Ok(()),
                },
                &ctx,
            )
            .unwrap();
        assert!(screen.editor.is_none());
        assert!(matches!(action, ScreenAction::Batch(_)));
    }

    #[test]
    fn test_failed_save_keeps_form_open() {
        let config = Config::default();
        let session = Session::anonymous();
        let ctx = ScreenContext::new(&config, &session, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut screen = loaded(&ctx);

        // Edit João, save with Ctrl+S
        screen.handle_event(press(KeyCode::Char('e')), &ctx).unwrap();
        let action = screen.handle_event(ctrl('s'), &ctx).unwrap();
        assert!(matches!(action, ScreenAction::Request(ApiRequest::SaveBarber(_))));

        screen
            .on_response(
                ApiResponse::Saved {
                    what: "Barber 'João'".to_string(),
                    result: Err("API error (500)".to_string()),
                },
                &ctx,
            )
            .unwrap();
        let editor = screen.editor.as_ref().unwrap();
        assert!(!editor.saving);
        assert_eq!(editor.error.as_deref(), Some("API error (500)"));
    }

    #[test]
    fn test_invalid_form_shows_error_without_request() {
        let config = Config::default();
        let session = Session::anonymous();
        let ctx = ScreenContext::new(&config, &session, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut screen = loaded(&ctx);
        screen.handle_event(press(KeyCode::BackTab), &ctx).unwrap();
        assert_eq!(screen.tab(), CatalogTab::TimeSlots);

        screen.handle_event(press(KeyCode::Char('c')), &ctx).unwrap();
        let action = screen.handle_event(press(KeyCode::Enter), &ctx).unwrap();
        assert!(action.is_none());
        assert_eq!(
            screen.editor.as_ref().and_then(|e| e.error.as_deref()),
            Some("Start is required")
        );

        screen.handle_event(press(KeyCode::Esc), &ctx).unwrap();
        assert!(screen.editor.is_none());
    }
}
