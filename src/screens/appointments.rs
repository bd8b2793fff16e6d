//! Appointments screen.
//!
//! Lists every appointment and lets an operator move it through its stages,
//! cancel it, or narrow the list with the server-side filter. The last full
//! list is kept so clearing the filter does not need another round trip.

use crate::api::models::{AppointmentFilter, BookingResponse, BookingStage, Id};
use crate::api::{ApiRequest, ApiResponse};
use crate::components::{Footer, Header, Popup};
use crate::keymap::Action;
use crate::remote::Remote;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Screen as ScreenId;
use crate::utils::{
    center_fixed, create_standard_layout, format, is_typed_char, pane_border_style, ListStateExt,
    TextInput,
};
use crate::widgets::{Dialog, DialogVariant, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Padding, Paragraph, Row,
    Table, TableState,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
    Name,
    Stage,
}

/// Popup for `POST /agendas/filtro`.
#[derive(Debug)]
struct FilterForm {
    name: TextInput,
    stage: Option<BookingStage>,
    focus: FilterField,
}

impl FilterForm {
    fn from_filter(filter: &AppointmentFilter) -> Self {
        Self {
            name: TextInput::with_text(filter.name.clone().unwrap_or_default()).max_len(80),
            stage: filter.stage,
            focus: FilterField::Name,
        }
    }

    /// Cycle through "any" and each stage.
    fn cycle_stage(&mut self, forward: bool) {
        let options: Vec<Option<BookingStage>> = std::iter::once(None)
            .chain(BookingStage::ALL.iter().copied().map(Some))
            .collect();
        let current = options.iter().position(|s| *s == self.stage).unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.stage = options[next];
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FilterField::Name => FilterField::Stage,
            FilterField::Stage => FilterField::Name,
        };
    }

    fn to_filter(&self) -> AppointmentFilter {
        let name = self.name.text_trimmed();
        AppointmentFilter {
            name: (!name.is_empty()).then(|| name.to_string()),
            stage: self.stage,
            ..AppointmentFilter::default()
        }
    }
}

#[derive(Debug)]
enum Mode {
    Browse,
    StagePicker { id: Id, list: ListState },
    ConfirmCancel { id: Id, client: String },
    Filter(FilterForm),
}

pub struct AppointmentsScreen {
    appointments: Remote<Vec<BookingResponse>>,
    /// Last unfiltered list, restored when the filter is cleared
    full_list: Option<Vec<BookingResponse>>,
    filter: AppointmentFilter,
    table_state: TableState,
    mode: Mode,
}

impl Default for AppointmentsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentsScreen {
    pub fn new() -> Self {
        Self {
            appointments: Remote::Idle,
            full_list: None,
            filter: AppointmentFilter::default(),
            table_state: TableState::default(),
            mode: Mode::Browse,
        }
    }

    fn rows(&self) -> &[BookingResponse] {
        self.appointments.value().map(Vec::as_slice).unwrap_or(&[])
    }

    fn selected(&self) -> Option<&BookingResponse> {
        self.table_state.selected().and_then(|i| self.rows().get(i))
    }

    /// Fetch the list matching the current filter.
    fn reload(&mut self) -> ScreenAction {
        self.appointments = Remote::Loading;
        if self.filter.is_empty() {
            ScreenAction::Request(ApiRequest::ListAppointments)
        } else {
            ScreenAction::Request(ApiRequest::FilterAppointments(self.filter.clone()))
        }
    }

    fn clear_filter(&mut self) -> ScreenAction {
        if self.filter.is_empty() {
            return ScreenAction::None;
        }
        self.filter = AppointmentFilter::default();
        match self.full_list.clone() {
            Some(list) => {
                debug!("Restoring {} appointments from the last full list", list.len());
                self.appointments = Remote::Ready(list);
                self.table_state.clamp_to(self.rows().len());
                ScreenAction::None
            }
            None => self.reload(),
        }
    }

    fn handle_browse(&mut self, action: Action) -> ScreenAction {
        match action {
            Action::Cancel | Action::Quit => ScreenAction::Navigate(ScreenId::MainMenu),
            Action::Refresh => self.reload(),
            Action::Search => {
                self.mode = Mode::Filter(FilterForm::from_filter(&self.filter));
                ScreenAction::None
            }
            Action::ClearFilter => self.clear_filter(),
            Action::ChangeStage | Action::Confirm => {
                if let Some(appointment) = self.selected() {
                    let id = appointment.id;
                    let mut list = ListState::default();
                    list.select(
                        BookingStage::ALL
                            .iter()
                            .position(|s| *s == appointment.stage)
                            .or(Some(0)),
                    );
                    self.mode = Mode::StagePicker { id, list };
                }
                ScreenAction::None
            }
            Action::Delete => {
                match self.selected() {
                    Some(a) if a.stage == BookingStage::Canceled => {
                        return ScreenAction::error(format!("Appointment #{} is already canceled", a.id));
                    }
                    Some(a) => {
                        self.mode = Mode::ConfirmCancel {
                            id: a.id,
                            client: a.name.clone(),
                        }
                    }
                    None => {}
                }
                ScreenAction::None
            }
            other => {
                let total = self.rows().len();
                self.table_state.navigate(other, total);
                ScreenAction::None
            }
        }
    }

    fn handle_stage_picker(&mut self, action: Action) -> ScreenAction {
        let Mode::StagePicker { id, list } = &mut self.mode else {
            return ScreenAction::None;
        };
        match action {
            Action::Cancel => {
                self.mode = Mode::Browse;
                ScreenAction::None
            }
            Action::Confirm => {
                let id = *id;
                let stage = list
                    .selected()
                    .and_then(|i| BookingStage::ALL.get(i).copied());
                self.mode = Mode::Browse;
                match stage {
                    Some(stage) => {
                        info!("Moving appointment {} to {}", id, stage.wire_name());
                        ScreenAction::Request(ApiRequest::UpdateStage { id, stage })
                    }
                    None => ScreenAction::None,
                }
            }
            other => {
                list.navigate(other, BookingStage::ALL.len());
                ScreenAction::None
            }
        }
    }

    fn handle_confirm_cancel(&mut self, action: Action) -> ScreenAction {
        let Mode::ConfirmCancel { id, .. } = &self.mode else {
            return ScreenAction::None;
        };
        let id = *id;
        match action {
            Action::Yes | Action::Confirm => {
                self.mode = Mode::Browse;
                info!("Canceling appointment {}", id);
                ScreenAction::Request(ApiRequest::CancelAppointment(id))
            }
            Action::No | Action::Cancel => {
                self.mode = Mode::Browse;
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent, action: Option<Action>) -> ScreenAction {
        let Mode::Filter(form) = &mut self.mode else {
            return ScreenAction::None;
        };

        if form.focus == FilterField::Name
            && (is_typed_char(key.code, key.modifiers)
                || !action.is_some_and(|a| TextInput::is_action_allowed_when_focused(&a)))
        {
            form.name.handle_key_with_action(key.code, key.modifiers, action);
            return ScreenAction::None;
        }

        match action {
            Some(Action::Cancel) => {
                self.mode = Mode::Browse;
                ScreenAction::None
            }
            Some(Action::NextTab | Action::PrevTab | Action::MoveUp | Action::MoveDown) => {
                form.toggle_focus();
                ScreenAction::None
            }
            Some(Action::MoveLeft) if form.focus == FilterField::Stage => {
                form.cycle_stage(false);
                ScreenAction::None
            }
            Some(Action::MoveRight | Action::ToggleSelect) if form.focus == FilterField::Stage => {
                form.cycle_stage(true);
                ScreenAction::None
            }
            Some(Action::Confirm | Action::Save) => {
                let filter = form.to_filter();
                self.mode = Mode::Browse;
                self.table_state.select(None);
                if filter.is_empty() {
                    return self.clear_filter();
                }
                info!("Filtering appointments ({} criteria)", filter.active_count());
                self.filter = filter;
                self.reload()
            }
            _ => ScreenAction::None,
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = if self.filter.is_empty() {
            " Appointments ".to_string()
        } else {
            format!(" Appointments (filtered: {}) ", filter_summary(&self.filter))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(title)
            .title_style(t.title_style());

        let message = match &self.appointments {
            Remote::Idle | Remote::Loading => Some(("Loading appointments…".to_string(), t.muted_style())),
            Remote::Failed(e) => Some((format!("Could not load appointments: {}. Press r to retry.", e), t.error_style())),
            Remote::Ready(list) if list.is_empty() => Some((
                if self.filter.is_empty() {
                    "No appointments yet.".to_string()
                } else {
                    "No appointments match the filter. Press x to clear it.".to_string()
                },
                t.muted_style(),
            )),
            Remote::Ready(_) => None,
        };
        if let Some((text, style)) = message {
            frame.render_widget(
                Paragraph::new(Line::styled(text, style)).block(block.padding(Padding::uniform(1))),
                area,
            );
            return;
        }

        let header = Row::new(
            ["#", "Client", "Contact", "Barber", "Service", "Day", "Time", "Price", "Stage"]
                .into_iter()
                .map(|h| Cell::from(h).style(t.emphasis_style())),
        )
        .height(1);

        let rows: Vec<Row> = self
            .rows()
            .iter()
            .map(|a| {
                let day = a.date().map(format::date).unwrap_or_else(|| a.day.clone());
                Row::new(vec![
                    Cell::from(a.id.to_string()),
                    Cell::from(a.name.clone()),
                    Cell::from(format::phone(&a.contact)),
                    Cell::from(a.barber.name.clone()),
                    Cell::from(a.service.description.clone()),
                    Cell::from(day),
                    Cell::from(a.time_slot.label()),
                    Cell::from(format::money(a.price)),
                    Cell::from(a.stage.label()).style(t.stage_style(a.stage)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(16),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_popup(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        match &mut self.mode {
            Mode::Browse => {}
            Mode::StagePicker { id, list } => {
                let popup = center_fixed(area, 40, BookingStage::ALL.len() as u16 + 4);
                frame.render_widget(Clear, popup);
                let items: Vec<ListItem> = BookingStage::ALL
                    .iter()
                    .map(|s| {
                        ListItem::new(Line::from(vec![
                            Span::styled(format!("{:<12}", s.label()), t.stage_style(*s)),
                            Span::styled(s.description(), t.muted_style()),
                        ]))
                    })
                    .collect();
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_focused_style())
                    .title(format!(" Stage for #{} ", id))
                    .padding(Padding::horizontal(1));
                let picker = List::new(items)
                    .block(block)
                    .highlight_style(t.highlight_style())
                    .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
                frame.render_stateful_widget(picker, popup, list);
            }
            Mode::ConfirmCancel { id, client } => {
                let content = format!("Cancel appointment #{} for {}?", id, client);
                frame.render_widget(
                    Dialog::new("Cancel appointment", &content)
                        .variant(DialogVariant::Warning)
                        .footer("y: Yes | n: No"),
                    area,
                );
            }
            Mode::Filter(form) => {
                let areas = Popup::new(52, 12)
                    .title("Filter appointments")
                    .footer("Tab: Field | ←/→: Stage | Enter: Apply | Esc: Close")
                    .render(frame, area);
                let [name_area, stage_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Length(3)])
                        .areas(areas.content);
                frame.render_text_input_widget(
                    TextInputWidget::new(&form.name)
                        .title("Client name")
                        .placeholder("any")
                        .focused(form.focus == FilterField::Name),
                    name_area,
                );

                let stage_text = match form.stage {
                    Some(stage) => Span::styled(format!("◀ {} ▶", stage.label()), t.stage_style(stage)),
                    None => Span::styled("◀ any ▶", t.muted_style()),
                };
                frame.render_widget(
                    Paragraph::new(Line::from(stage_text)).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(pane_border_style(form.focus == FilterField::Stage))
                            .title(" Stage "),
                    ),
                    stage_area,
                );
            }
        }
    }

    fn footer_actions(&self) -> Vec<Action> {
        let mut actions = vec![
            Action::ChangeStage,
            Action::Delete,
            Action::Search,
            Action::Refresh,
        ];
        if !self.filter.is_empty() {
            actions.push(Action::ClearFilter);
        }
        actions.push(Action::Cancel);
        actions
    }
}

fn filter_summary(filter: &AppointmentFilter) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &filter.name {
        parts.push(format!("name \"{}\"", name));
    }
    if let Some(stage) = filter.stage {
        parts.push(format!("stage {}", stage.label()));
    }
    parts.join(", ")
}

impl Screen for AppointmentsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header_chunk, content_chunk, footer_chunk) = create_standard_layout(area, 4, 2);
        Header::render(
            frame,
            header_chunk,
            ScreenId::Appointments.title(),
            ScreenId::Appointments.description(),
            ctx.session.customer(),
        );
        self.render_table(frame, content_chunk);
        self.render_popup(frame, area);

        let footer = ctx.config.keymap.footer(&self.footer_actions());
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
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);

        if matches!(self.mode, Mode::Filter(_)) {
            return Ok(self.handle_filter_key(key, action));
        }
        let Some(action) = action else {
            return Ok(ScreenAction::None);
        };
        Ok(match self.mode {
            Mode::Browse => self.handle_browse(action),
            Mode::StagePicker { .. } => self.handle_stage_picker(action),
            Mode::ConfirmCancel { .. } => self.handle_confirm_cancel(action),
            Mode::Filter(_) => ScreenAction::None,
        })
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match response {
            ApiResponse::Appointments { filtered, result } => {
                // An answer for a filter state the user already left
                if filtered == self.filter.is_empty() {
                    debug!("Discarding appointments response (filtered: {})", filtered);
                    return Ok(ScreenAction::None);
                }
                let action = match &result {
                    Err(e) => ScreenAction::error(format!("Could not load appointments: {}", e)),
                    Ok(list) => {
                        if !filtered {
                            self.full_list = Some(list.clone());
                        }
                        ScreenAction::None
                    }
                };
                self.appointments.resolve(result);
                self.table_state.clamp_to(self.rows().len());
                Ok(action)
            }
            ApiResponse::StageUpdated { id, stage, result } => Ok(match result {
                Ok(()) => ScreenAction::success(format!("Appointment #{} is now {}", id, stage.label()))
                    .and(self.reload()),
                Err(e) => ScreenAction::error(format!("Could not update appointment #{}: {}", id, e)),
            }),
            ApiResponse::AppointmentCanceled { id, result } => Ok(match result {
                Ok(()) => ScreenAction::success(format!("Appointment #{} canceled", id)).and(self.reload()),
                Err(e) => ScreenAction::error(format!("Could not cancel appointment #{}: {}", id, e)),
            }),
            _ => Ok(ScreenAction::None),
        }
    }

    fn is_input_focused(&self) -> bool {
        matches!(&self.mode, Mode::Filter(form) if form.focus == FilterField::Name)
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        self.mode = Mode::Browse;
        Ok(self.reload())
    }
}
