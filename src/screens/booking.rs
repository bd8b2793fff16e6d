//! Booking screen controller.
//!
//! A thin shell around [`BookingWizard`]: keys become wizard operations,
//! wizard effects become API requests, and responses are fed back through
//! the wizard's `apply_*` methods. The screen only owns presentation state
//! (text inputs, list cursors, the calendar).

use crate::api::models::{Barber, TimeSlot};
use crate::api::{ApiRequest, ApiResponse};
use crate::booking::{BookingWizard, Field, StepError, Submission, WizardEffect, WizardStep};
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::remote::{Remote, Resolution};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::session::Session;
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::ui::Screen as ScreenId;
use crate::utils::{
    create_standard_layout, format, is_typed_char, pane_border_style, InputKind, ListStateExt,
    TextInput,
};
use crate::widgets::{DatePicker, DatePickerWidget, TextInputWidget, TextInputWidgetExt, Toast};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};
use tracing::debug;

pub struct BookingScreen {
    wizard: BookingWizard,
    contact_input: TextInput,
    name_input: TextInput,
    barber_list: ListState,
    service_list: ListState,
    slot_list: ListState,
    date_picker: DatePicker,
    /// Last validation failure, shown inline until the next key
    validation: Option<String>,
}

fn to_action(effect: Option<WizardEffect>) -> ScreenAction {
    effect.map(ApiRequest::from).into()
}

impl BookingScreen {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            wizard: BookingWizard::new(today),
            contact_input: TextInput::with_kind(InputKind::Phone).max_len(20),
            name_input: TextInput::new().max_len(80),
            barber_list: ListState::default(),
            service_list: ListState::default(),
            slot_list: ListState::default(),
            date_picker: DatePicker::new(today),
            validation: None,
        }
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    /// Fill empty inputs from the signed-in customer. The wizard's own form
    /// is left alone until the user confirms each step.
    fn prefill(&mut self, session: &Session) {
        if let Some(customer) = session.customer() {
            if self.contact_input.is_empty() {
                self.contact_input.set_text(customer.contact.clone());
            }
            if self.name_input.is_empty() {
                self.name_input.set_text(customer.name.clone());
            }
        }
    }

    /// Barbers the customer can choose: active ones only.
    fn visible_barbers(&self) -> Vec<&Barber> {
        self.wizard
            .barbers()
            .value()
            .map(|list| list.iter().filter(|b| b.is_active()).collect())
            .unwrap_or_default()
    }

    fn visible_slots(&self) -> &[TimeSlot] {
        if self.wizard.slots_loading() {
            return &[];
        }
        self.wizard.displayed_slots()
    }

    /// Point each list cursor at the current selection (or the first row).
    fn sync_cursors(&mut self) {
        let form = self.wizard.form().clone();

        let barbers = self.visible_barbers();
        let index = form
            .barber_id
            .and_then(|id| barbers.iter().position(|b| b.id == id));
        let count = barbers.len();
        self.barber_list.select(index);
        self.barber_list.clamp_to(count);

        let services = self.wizard.services();
        let index = form
            .service_id
            .and_then(|id| services.iter().position(|s| s.id == id));
        let count = services.len();
        self.service_list.select(index);
        self.service_list.clamp_to(count);

        let slots = self.visible_slots();
        let index = form
            .time_slot_id
            .and_then(|id| slots.iter().position(|s| s.id == id));
        let count = slots.len();
        self.slot_list.select(index);
        self.slot_list.clamp_to(count);

        if let Some(date) = form.date {
            self.date_picker.set_cursor(date);
        }
    }

    fn fail(&mut self, error: StepError) -> ScreenAction {
        debug!("Booking validation: {}", error);
        self.validation = Some(error.to_string());
        ScreenAction::None
    }

    /// Run a transition, turning validation errors into the inline message.
    fn transition(&mut self, result: Result<Option<WizardEffect>, StepError>) -> ScreenAction {
        let action = match result {
            Ok(effect) => to_action(effect),
            Err(e) => self.fail(e),
        };
        self.sync_cursors();
        action
    }

    fn restart(&mut self, session: &Session) -> ScreenAction {
        let effect = self.wizard.restart();
        self.contact_input.clear();
        self.name_input.clear();
        self.date_picker = DatePicker::new(self.wizard.today());
        self.prefill(session);
        self.sync_cursors();
        to_action(Some(effect))
    }

    fn back(&mut self) -> ScreenAction {
        if matches!(
            self.wizard.step(),
            WizardStep::Welcome | WizardStep::Confirmation
        ) {
            return ScreenAction::Navigate(ScreenId::MainMenu);
        }
        if let Err(e) = self.wizard.back() {
            return self.fail(e);
        }
        self.sync_cursors();
        ScreenAction::None
    }

    /// Commit the highlighted choice of the current step and move on.
    fn confirm(&mut self, session: &Session) -> ScreenAction {
        match self.wizard.step() {
            WizardStep::Welcome => {
                let result = self.wizard.advance();
                self.transition(result)
            }
            WizardStep::Contact => {
                let contact = self.contact_input.text_trimmed().to_string();
                if let Err(e) = self.wizard.set_contact(contact) {
                    return self.fail(e);
                }
                let result = self.wizard.advance();
                self.transition(result)
            }
            WizardStep::SelectBarber => {
                let Some(id) = self
                    .barber_list
                    .selected()
                    .and_then(|i| self.visible_barbers().get(i).map(|b| b.id))
                else {
                    return self.fail(StepError::Missing(Field::Barber));
                };
                let fetch = match self.wizard.select_barber(id) {
                    Ok(effect) => to_action(effect),
                    Err(e) => return self.fail(e),
                };
                let result = self.wizard.advance();
                fetch.and(self.transition(result))
            }
            WizardStep::SelectService => {
                let id = self
                    .service_list
                    .selected()
                    .and_then(|i| self.wizard.services().get(i).map(|s| s.id));
                if let Some(id) = id {
                    if let Err(e) = self.wizard.select_service(id) {
                        return self.fail(e);
                    }
                }
                let result = self.wizard.advance();
                self.transition(result)
            }
            WizardStep::SelectDate => {
                let fetch = match self.wizard.select_date(self.date_picker.cursor()) {
                    Ok(effect) => to_action(effect),
                    Err(e) => return self.fail(e),
                };
                let result = self.wizard.advance();
                fetch.and(self.transition(result))
            }
            WizardStep::SelectTime => {
                let id = self
                    .slot_list
                    .selected()
                    .and_then(|i| self.visible_slots().get(i).map(|s| s.id));
                if let Some(id) = id {
                    if let Err(e) = self.wizard.select_slot(id) {
                        return self.fail(e);
                    }
                }
                let result = self.wizard.advance();
                self.transition(result)
            }
            WizardStep::EnterName => {
                let name = self.name_input.text_trimmed().to_string();
                if let Err(e) = self.wizard.set_name(name) {
                    return self.fail(e);
                }
                let result = self.wizard.advance();
                self.transition(result)
            }
            WizardStep::Confirmation => self.restart(session),
        }
    }

    fn navigate(&mut self, action: Action) -> bool {
        match self.wizard.step() {
            WizardStep::SelectBarber => {
                let count = self.visible_barbers().len();
                self.barber_list.navigate(action, count)
            }
            WizardStep::SelectService => {
                let count = self.wizard.services().len();
                self.service_list.navigate(action, count)
            }
            WizardStep::SelectDate => self.date_picker.handle_action(action),
            WizardStep::SelectTime => {
                let count = self.visible_slots().len();
                self.slot_list.navigate(action, count)
            }
            _ => false,
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.wizard.step() {
            WizardStep::Contact => Some(&mut self.contact_input),
            WizardStep::EnterName => Some(&mut self.name_input),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);
        self.validation = None;

        if let Some(input) = self.focused_input() {
            let screen_action = action.filter(|a| {
                TextInput::is_action_allowed_when_focused(a) && !is_typed_char(key.code, key.modifiers)
            });
            if screen_action.is_none() {
                input.handle_key_with_action(key.code, key.modifiers, action);
                return ScreenAction::None;
            }
        }

        let Some(action) = action else {
            return ScreenAction::None;
        };
        match action {
            Action::Confirm => self.confirm(ctx.session),
            Action::Cancel => self.back(),
            Action::Restart => self.restart(ctx.session),
            Action::Refresh => {
                let effect = self.wizard.refresh();
                self.sync_cursors();
                to_action(effect)
            }
            Action::Quit => ScreenAction::Navigate(ScreenId::MainMenu),
            other => {
                self.navigate(other);
                ScreenAction::None
            }
        }
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let current = self.wizard.step();
        let summary = self.wizard.summary();

        let lines: Vec<Line> = WizardStep::ALL
            .iter()
            .map(|step| {
                let (marker, style) = if step.index() < current.index() {
                    ("✓ ", t.success_style())
                } else if *step == current {
                    ("→ ", t.title_style())
                } else {
                    ("  ", t.muted_style())
                };
                let value = match step {
                    WizardStep::Contact if !summary.contact.is_empty() => format::phone(summary.contact),
                    WizardStep::SelectBarber => summary.barber.map(|b| b.name.clone()).unwrap_or_default(),
                    WizardStep::SelectService => summary
                        .service
                        .map(|s| s.description.clone())
                        .unwrap_or_default(),
                    WizardStep::SelectDate => summary.date.map(format::date).unwrap_or_default(),
                    WizardStep::SelectTime => summary.time_slot.map(|s| s.label()).unwrap_or_default(),
                    WizardStep::EnterName => summary.name.to_string(),
                    _ => String::new(),
                };
                let mut spans = vec![Span::styled(marker, style), Span::styled(step.title(), style)];
                if !value.is_empty() {
                    spans.push(Span::styled(format!("  {}", value), t.muted_style()));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .title(" Steps ")
                    .padding(Padding::new(1, 1, 1, 0)),
            ),
            area,
        );
    }

    fn step_block(&self, title: &str) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(pane_border_style(true))
            .title(format!(" {} ", title))
            .title_style(theme().title_style())
            .padding(Padding::new(2, 2, 1, 0))
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(self.step_block(title)),
            area,
        );
    }

    fn render_list(
        frame: &mut Frame,
        area: Rect,
        block: Block,
        items: Vec<ListItem>,
        state: &mut ListState,
    ) {
        let list = List::new(items)
            .block(block)
            .highlight_style(theme().highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(list, area, state);
    }

    fn render_step(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let step = self.wizard.step();
        match step {
            WizardStep::Welcome => self.render_message(
                frame,
                area,
                "Welcome",
                vec![
                    Line::styled("Book your next cut in a few steps.", t.text_style()),
                    Line::raw(""),
                    Line::styled(
                        "You'll choose a barber, one of their services, a day and a free time.",
                        t.text_style(),
                    ),
                    Line::raw(""),
                    Line::styled("Press Enter to start.", t.emphasis_style()),
                ],
            ),
            WizardStep::Contact => {
                let [input_area, _] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(
                        self.step_block("Contact").inner(area),
                    );
                frame.render_widget(self.step_block("Contact"), area);
                frame.render_text_input_widget(
                    TextInputWidget::new(&self.contact_input)
                        .title("Phone")
                        .placeholder("(18) 99999-0000")
                        .hint(self.validation.as_deref())
                        .focused(true),
                    input_area,
                );
            }
            WizardStep::SelectBarber => match self.wizard.barbers() {
                Remote::Idle | Remote::Loading => self.render_message(
                    frame,
                    area,
                    "Barber",
                    vec![Line::styled("Loading barbers…", t.muted_style())],
                ),
                Remote::Failed(message) => {
                    let message = message.clone();
                    self.render_message(
                        frame,
                        area,
                        "Barber",
                        vec![
                            Line::styled("Could not load barbers.", t.error_style()),
                            Line::styled(message, t.muted_style()),
                            Line::raw(""),
                            Line::styled("Press r to try again.", t.emphasis_style()),
                        ],
                    )
                }
                Remote::Ready(_) if self.visible_barbers().is_empty() => self.render_message(
                    frame,
                    area,
                    "Barber",
                    vec![Line::styled("No barbers are available right now.", t.muted_style())],
                ),
                Remote::Ready(_) => {
                    let items: Vec<ListItem> = self
                        .visible_barbers()
                        .iter()
                        .map(|b| {
                            ListItem::new(Line::from(vec![
                                Span::styled(b.name.clone(), t.text_style()),
                                Span::styled(
                                    format!("  {} services · {} time slots", b.services.len(), b.time_slots.len()),
                                    t.muted_style(),
                                ),
                            ]))
                        })
                        .collect();
                    let block = self.step_block("Barber");
                    Self::render_list(frame, area, block, items, &mut self.barber_list);
                }
            },
            WizardStep::SelectService => {
                let services = self.wizard.services();
                if services.is_empty() {
                    self.render_message(
                        frame,
                        area,
                        "Service",
                        vec![Line::styled(
                            "This barber has no services. Press Esc to choose another barber.",
                            t.muted_style(),
                        )],
                    );
                    return;
                }
                let items: Vec<ListItem> = services
                    .iter()
                    .map(|s| {
                        ListItem::new(Line::from(vec![
                            Span::styled(format!("{:<28}", s.description), t.text_style()),
                            Span::styled(format::money(s.price), t.emphasis_style()),
                        ]))
                    })
                    .collect();
                let block = self.step_block("Service");
                Self::render_list(frame, area, block, items, &mut self.service_list);
            }
            WizardStep::SelectDate => {
                let [calendar_area, hours_area] = Layout::horizontal([
                    Constraint::Length(DatePickerWidget::inner_width() + 2),
                    Constraint::Min(0),
                ])
                .areas(area);
                let [calendar_area, _] =
                    Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).areas(calendar_area);
                frame.render_widget(
                    DatePickerWidget::new(&self.date_picker).selected(self.wizard.form().date),
                    calendar_area,
                );

                let mut lines = vec![
                    Line::styled(format::date_long(self.date_picker.cursor()), t.emphasis_style()),
                    Line::raw(""),
                    Line::styled("Working hours", t.title_style()),
                ];
                if let Some(barber) = self.wizard.selected_barber() {
                    lines.extend(
                        barber
                            .time_slots
                            .iter()
                            .filter(|s| s.is_active())
                            .map(|s| Line::styled(format!("  {}", s.label()), t.text_style())),
                    );
                }
                if let Some(message) = &self.validation {
                    lines.push(Line::raw(""));
                    lines.push(Line::styled(message.clone(), t.error_style()));
                }
                self.render_message(frame, hours_area, "Day", lines);
            }
            WizardStep::SelectTime => {
                let day = self.wizard.form().date.map(format::date).unwrap_or_default();
                if self.wizard.slots_loading() {
                    self.render_message(
                        frame,
                        area,
                        "Time",
                        vec![Line::styled(format!("Checking availability for {}…", day), t.muted_style())],
                    );
                } else if let Some(message) = self.wizard.slots().error() {
                    let message = message.to_string();
                    self.render_message(
                        frame,
                        area,
                        "Time",
                        vec![
                            Line::styled("Could not load free times.", t.error_style()),
                            Line::styled(message, t.muted_style()),
                            Line::raw(""),
                            Line::styled("Press r to try again.", t.emphasis_style()),
                        ],
                    );
                } else if self.visible_slots().is_empty() {
                    self.render_message(
                        frame,
                        area,
                        "Time",
                        vec![Line::styled(
                            format!("No free times on {}. Press Esc to pick another day.", day),
                            t.muted_style(),
                        )],
                    );
                } else {
                    let items: Vec<ListItem> = self
                        .visible_slots()
                        .iter()
                        .map(|s| ListItem::new(Line::styled(s.label(), t.text_style())))
                        .collect();
                    let block = self.step_block(&format!("Time on {}", day));
                    Self::render_list(frame, area, block, items, &mut self.slot_list);
                }
            }
            WizardStep::EnterName => {
                let block = self.step_block("Review & name");
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let [input_area, _, review_area] = Layout::vertical([
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .areas(inner);

                let in_flight = *self.wizard.submission() == Submission::InFlight;
                frame.render_text_input_widget(
                    TextInputWidget::new(&self.name_input)
                        .title("Your name")
                        .placeholder("Maria")
                        .hint(self.validation.as_deref())
                        .focused(!in_flight)
                        .disabled(in_flight),
                    input_area,
                );

                let summary = self.wizard.summary();
                let mut lines = vec![
                    review_line("Contact", format::phone(summary.contact)),
                    review_line("Barber", summary.barber.map(|b| b.name.clone()).unwrap_or_default()),
                    review_line(
                        "Service",
                        summary
                            .service
                            .map(|s| format!("{}  {}", s.description, format::money(s.price)))
                            .unwrap_or_default(),
                    ),
                    review_line("Day", summary.date.map(format::date_long).unwrap_or_default()),
                    review_line("Time", summary.time_slot.map(|s| s.label()).unwrap_or_default()),
                    Line::raw(""),
                ];
                match self.wizard.submission() {
                    Submission::InFlight => {
                        lines.push(Line::styled("Sending your booking…", t.muted_style()))
                    }
                    Submission::Failed(message) => {
                        lines.push(Line::styled(format!("Booking failed: {}", message), t.error_style()));
                        lines.push(Line::styled("Press Enter to try again.", t.emphasis_style()));
                    }
                    Submission::Idle => {
                        lines.push(Line::styled("Press Enter to confirm the booking.", t.emphasis_style()))
                    }
                }
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), review_area);
            }
            WizardStep::Confirmation => {
                let Some(booking) = self.wizard.confirmation() else {
                    return;
                };
                let day = booking
                    .date()
                    .map(format::date_long)
                    .unwrap_or_else(|| booking.day.clone());
                let lines = vec![
                    Line::styled(format!("Booking #{} received!", booking.id), t.success_style()),
                    Line::raw(""),
                    review_line("Name", booking.name.clone()),
                    review_line("Contact", format::phone(&booking.contact)),
                    review_line("Barber", booking.barber.name.clone()),
                    review_line("Service", booking.service.description.clone()),
                    review_line("Day", day),
                    review_line("Time", booking.time_slot.label()),
                    review_line("Price", format::money(booking.price)),
                    Line::from(vec![
                        Span::styled(format!("{:<10}", "Stage"), t.muted_style()),
                        Span::styled(booking.stage.label(), t.stage_style(booking.stage)),
                    ]),
                    Line::raw(""),
                    Line::styled("Press Enter to book again or Esc for the menu.", t.emphasis_style()),
                ];
                self.render_message(frame, area, "Confirmed", lines);
            }
        }
    }

    fn footer_actions(&self) -> Vec<Action> {
        match self.wizard.step() {
            WizardStep::Welcome => vec![Action::Confirm, Action::Cancel],
            WizardStep::Contact | WizardStep::EnterName => {
                vec![Action::Confirm, Action::Cancel, Action::Restart]
            }
            WizardStep::SelectBarber | WizardStep::SelectTime => vec![
                Action::Confirm,
                Action::Cancel,
                Action::Refresh,
                Action::Restart,
            ],
            WizardStep::SelectService | WizardStep::SelectDate => {
                vec![Action::Confirm, Action::Cancel, Action::Restart]
            }
            WizardStep::Confirmation => vec![Action::Restart, Action::Cancel],
        }
    }
}

fn review_line(label: &str, value: String) -> Line<'static> {
    let t = theme();
    Line::from(vec![
        Span::styled(format!("{:<10}", label), t.muted_style()),
        Span::styled(value, t.text_style()),
    ])
}

impl Screen for BookingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header_chunk, content_chunk, footer_chunk) = create_standard_layout(area, 4, 2);
        Header::render(
            frame,
            header_chunk,
            ScreenId::Booking.title(),
            ScreenId::Booking.description(),
            ctx.session.customer(),
        );

        let [progress_area, step_area] =
            Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).areas(content_chunk);
        self.render_progress(frame, progress_area);
        self.render_step(frame, step_area);

        let footer = ctx.config.keymap.footer(&self.footer_actions());
        Footer::render(frame, footer_chunk, &footer);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, ctx)),
            _ => Ok(ScreenAction::None),
        }
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let action = match response {
            ApiResponse::Barbers(result) => {
                let error = result.as_ref().err().cloned();
                match (self.wizard.apply_barbers(result), error) {
                    (Resolution::Applied, Some(e)) => {
                        ScreenAction::Toast(Toast::error(format!("Could not load barbers: {}", e)))
                    }
                    _ => ScreenAction::None,
                }
            }
            ApiResponse::Slots { key, result } => {
                let error = result.as_ref().err().cloned();
                match (self.wizard.apply_slots(key, result), error) {
                    (Resolution::Applied, Some(e)) => ScreenAction::Toast(Toast::error(format!(
                        "Could not load free times: {}",
                        e
                    ))),
                    _ => ScreenAction::None,
                }
            }
            ApiResponse::BookingCreated(result) => {
                let outcome = result
                    .as_ref()
                    .map(|b| b.id)
                    .map_err(|e| e.clone());
                match (self.wizard.apply_submission(result), outcome) {
                    (Resolution::Stale, _) => ScreenAction::None,
                    (Resolution::Applied, Ok(id)) => {
                        ScreenAction::Toast(Toast::success(format!("Booking #{} confirmed", id)))
                    }
                    (Resolution::Applied, Err(e)) => {
                        ScreenAction::Toast(Toast::error(format!("Booking failed: {}", e)))
                    }
                }
            }
            _ => ScreenAction::None,
        };
        self.sync_cursors();
        Ok(action)
    }

    fn is_input_focused(&self) -> bool {
        matches!(
            self.wizard.step(),
            WizardStep::Contact | WizardStep::EnterName
        )
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<ScreenAction> {
        self.prefill(ctx.session);
        Ok(to_action(self.wizard.start()))
    }
}
