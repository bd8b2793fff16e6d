//! Create/edit popups of the catalog screen.
//!
//! Each form turns its inputs into a draft for the API or a [`FormError`]
//! shown under the popup title. Nothing is sent until the draft validates.

use crate::api::models::{Barber, BarberDraft, Id, Service, ServiceDraft, TimeSlot, TimeSlotDraft};
use crate::api::{ApiRequest, Catalog};
use crate::keymap::Action;
use crate::utils::{format, InputKind, ListStateExt, TextInput};
use chrono::NaiveTime;
use ratatui::widgets::ListState;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Price must be a number such as 30,00")]
    InvalidPrice,
    #[error("{0} must be a time such as 09:00")]
    InvalidTime(&'static str),
    #[error("End time must be after the start time")]
    EndNotAfterStart,
}

/// `30`, `30,5` or `30.50`. Negative and non-finite values are rejected.
pub fn parse_price(raw: &str) -> Result<f64, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Required("Price"));
    }
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| FormError::InvalidPrice)?;
    if !value.is_finite() || value < 0.0 {
        return Err(FormError::InvalidPrice);
    }
    Ok(value)
}

/// `9:00`, `09:00` or `09:00:00`.
pub fn parse_time(field: &'static str, raw: &str) -> Result<NaiveTime, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Required(field));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime(field))
}

/// One checkbox row in the barber form.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub id: Id,
    pub label: String,
    pub active: bool,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarberField {
    Name,
    Services,
    TimeSlots,
}

#[derive(Debug, Clone)]
pub struct BarberForm {
    id: Option<Id>,
    image_path: Option<String>,
    pub name: TextInput,
    pub services: Vec<Choice>,
    pub time_slots: Vec<Choice>,
    pub focus: BarberField,
    pub services_list: ListState,
    pub time_slots_list: ListState,
}

impl BarberForm {
    /// Checkbox lists span the whole catalog; an existing barber's links
    /// start checked.
    pub fn new(catalog: &Catalog, barber: Option<&Barber>) -> Self {
        let draft = barber.map(BarberDraft::from_barber).unwrap_or_default();
        let services = catalog
            .services
            .iter()
            .map(|s: &Service| Choice {
                id: s.id,
                label: format!("{}  {}", s.description, format::money(s.price)),
                active: s.is_active(),
                checked: draft.service_ids.contains(&s.id),
            })
            .collect::<Vec<_>>();
        let time_slots = catalog
            .time_slots
            .iter()
            .map(|h: &TimeSlot| Choice {
                id: h.id,
                label: h.label(),
                active: h.is_active(),
                checked: draft.time_slot_ids.contains(&h.id),
            })
            .collect::<Vec<_>>();

        let mut services_list = ListState::default();
        services_list.clamp_to(services.len());
        let mut time_slots_list = ListState::default();
        time_slots_list.clamp_to(time_slots.len());

        Self {
            id: draft.id,
            image_path: draft.image_path,
            name: TextInput::with_text(draft.name).max_len(80),
            services,
            time_slots,
            focus: BarberField::Name,
            services_list,
            time_slots_list,
        }
    }

    fn next_field(&mut self) {
        self.focus = match self.focus {
            BarberField::Name => BarberField::Services,
            BarberField::Services => BarberField::TimeSlots,
            BarberField::TimeSlots => BarberField::Name,
        };
    }

    fn prev_field(&mut self) {
        self.focus = match self.focus {
            BarberField::Name => BarberField::TimeSlots,
            BarberField::Services => BarberField::Name,
            BarberField::TimeSlots => BarberField::Services,
        };
    }

    /// Flip the highlighted checkbox of the focused list.
    pub fn toggle_current(&mut self) {
        let (choices, state) = match self.focus {
            BarberField::Services => (&mut self.services, &self.services_list),
            BarberField::TimeSlots => (&mut self.time_slots, &self.time_slots_list),
            BarberField::Name => return,
        };
        if let Some(choice) = state.selected().and_then(|i| choices.get_mut(i)) {
            choice.checked = !choice.checked;
        }
    }

    fn navigate(&mut self, action: Action) -> bool {
        match self.focus {
            BarberField::Services => self.services_list.navigate(action, self.services.len()),
            BarberField::TimeSlots => self.time_slots_list.navigate(action, self.time_slots.len()),
            BarberField::Name => false,
        }
    }

    pub fn to_draft(&self) -> Result<BarberDraft, FormError> {
        let name = self.name.text_trimmed();
        if name.is_empty() {
            return Err(FormError::Required("Name"));
        }
        let checked = |choices: &[Choice]| -> Vec<Id> {
            choices.iter().filter(|c| c.checked).map(|c| c.id).collect()
        };
        Ok(BarberDraft {
            id: self.id,
            name: name.to_string(),
            image_path: self.image_path.clone(),
            service_ids: checked(&self.services),
            time_slot_ids: checked(&self.time_slots),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Description,
    Price,
}

#[derive(Debug, Clone)]
pub struct ServiceForm {
    id: Option<Id>,
    pub description: TextInput,
    pub price: TextInput,
    pub focus: ServiceField,
}

impl ServiceForm {
    pub fn new(service: Option<&Service>) -> Self {
        let mut price = TextInput::with_kind(InputKind::Decimal).max_len(12);
        if let Some(s) = service {
            price.set_text(format!("{:.2}", s.price).replace('.', ","));
        }
        Self {
            id: service.map(|s| s.id),
            description: TextInput::with_text(
                service.map(|s| s.description.clone()).unwrap_or_default(),
            )
            .max_len(80),
            price,
            focus: ServiceField::Description,
        }
    }

    fn toggle_field(&mut self) {
        self.focus = match self.focus {
            ServiceField::Description => ServiceField::Price,
            ServiceField::Price => ServiceField::Description,
        };
    }

    pub fn to_draft(&self) -> Result<ServiceDraft, FormError> {
        let description = self.description.text_trimmed();
        if description.is_empty() {
            return Err(FormError::Required("Description"));
        }
        Ok(ServiceDraft {
            id: self.id,
            description: description.to_string(),
            price: parse_price(self.price.text())?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlotField {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct TimeSlotForm {
    id: Option<Id>,
    pub start: TextInput,
    pub end: TextInput,
    pub focus: TimeSlotField,
}

impl TimeSlotForm {
    pub fn new(slot: Option<&TimeSlot>) -> Self {
        let input = |value: Option<&str>| {
            let mut input = TextInput::with_kind(InputKind::Time).max_len(5);
            if let Some(value) = value {
                input.set_text(format::hour(value));
            }
            input
        };
        Self {
            id: slot.map(|s| s.id),
            start: input(slot.map(|s| s.start.as_str())),
            end: input(slot.map(|s| s.end.as_str())),
            focus: TimeSlotField::Start,
        }
    }

    fn toggle_field(&mut self) {
        self.focus = match self.focus {
            TimeSlotField::Start => TimeSlotField::End,
            TimeSlotField::End => TimeSlotField::Start,
        };
    }

    /// Times go out as `HH:MM:SS`, the format the server stores.
    pub fn to_draft(&self) -> Result<TimeSlotDraft, FormError> {
        let start = parse_time("Start", self.start.text())?;
        let end = parse_time("End", self.end.text())?;
        if end <= start {
            return Err(FormError::EndNotAfterStart);
        }
        Ok(TimeSlotDraft {
            id: self.id,
            start: start.format("%H:%M:%S").to_string(),
            end: end.format("%H:%M:%S").to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub enum CatalogForm {
    Barber(BarberForm),
    Service(ServiceForm),
    TimeSlot(TimeSlotForm),
}

impl CatalogForm {
    pub fn title(&self) -> &'static str {
        match self {
            CatalogForm::Barber(f) if f.id.is_some() => "Edit barber",
            CatalogForm::Barber(_) => "New barber",
            CatalogForm::Service(f) if f.id.is_some() => "Edit service",
            CatalogForm::Service(_) => "New service",
            CatalogForm::TimeSlot(f) if f.id.is_some() => "Edit time slot",
            CatalogForm::TimeSlot(_) => "New time slot",
        }
    }

    /// The text field with focus, if the focus is on one.
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self {
            CatalogForm::Barber(f) if f.focus == BarberField::Name => Some(&mut f.name),
            CatalogForm::Barber(_) => None,
            CatalogForm::Service(f) => Some(match f.focus {
                ServiceField::Description => &mut f.description,
                ServiceField::Price => &mut f.price,
            }),
            CatalogForm::TimeSlot(f) => Some(match f.focus {
                TimeSlotField::Start => &mut f.start,
                TimeSlotField::End => &mut f.end,
            }),
        }
    }

    pub fn is_input_focused(&self) -> bool {
        match self {
            CatalogForm::Barber(f) => f.focus == BarberField::Name,
            CatalogForm::Service(_) | CatalogForm::TimeSlot(_) => true,
        }
    }

    pub fn next_field(&mut self) {
        match self {
            CatalogForm::Barber(f) => f.next_field(),
            CatalogForm::Service(f) => f.toggle_field(),
            CatalogForm::TimeSlot(f) => f.toggle_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            CatalogForm::Barber(f) => f.prev_field(),
            CatalogForm::Service(f) => f.toggle_field(),
            CatalogForm::TimeSlot(f) => f.toggle_field(),
        }
    }

    /// List navigation and checkbox toggling. Returns true if consumed.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match self {
            CatalogForm::Barber(f) if action == Action::ToggleSelect => {
                f.toggle_current();
                true
            }
            CatalogForm::Barber(f) => f.navigate(action),
            _ => false,
        }
    }

    pub fn submit(&self) -> Result<ApiRequest, FormError> {
        Ok(match self {
            CatalogForm::Barber(f) => ApiRequest::SaveBarber(f.to_draft()?),
            CatalogForm::Service(f) => ApiRequest::SaveService(f.to_draft()?),
            CatalogForm::TimeSlot(f) => ApiRequest::SaveTimeSlot(f.to_draft()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            barbers: Vec::new(),
            services: vec![
                Service {
                    id: 10,
                    description: "Corte".to_string(),
                    price: 30.0,
                    deleted_at: None,
                    created_at: None,
                    updated_at: None,
                },
                Service {
                    id: 11,
                    description: "Barba".to_string(),
                    price: 25.0,
                    deleted_at: Some("2026-01-01T00:00:00".to_string()),
                    created_at: None,
                    updated_at: None,
                },
            ],
            time_slots: vec![TimeSlot {
                id: 100,
                start: "09:00:00".to_string(),
                end: "10:00:00".to_string(),
                deleted_at: None,
                created_at: None,
                updated_at: None,
            }],
        }
    }

    #[test]
    fn test_parse_price_accepts_comma_and_dot() {
        assert_eq!(parse_price("30"), Ok(30.0));
        assert_eq!(parse_price("30,5"), Ok(30.5));
        assert_eq!(parse_price(" 12.75 "), Ok(12.75));
        assert_eq!(parse_price(""), Err(FormError::Required("Price")));
        assert_eq!(parse_price("abc"), Err(FormError::InvalidPrice));
    }

    #[test]
    fn test_time_slot_requires_end_after_start() {
        let mut form = TimeSlotForm::new(None);
        form.start.set_text("10:00");
        form.end.set_text("09:00");
        assert_eq!(form.to_draft(), Err(FormError::EndNotAfterStart));

        form.end.set_text("11:30");
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.start, "10:00:00");
        assert_eq!(draft.end, "11:30:00");
        assert_eq!(draft.id, None);

        form.start.set_text("25:00");
        assert_eq!(form.to_draft(), Err(FormError::InvalidTime("Start")));
    }

    #[test]
    fn test_edit_service_prefills_localized_price() {
        let catalog = catalog();
        let form = ServiceForm::new(catalog.services.first());
        assert_eq!(form.price.text(), "30,00");
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.id, Some(10));
        assert_eq!(draft.price, 30.0);
    }

    #[test]
    fn test_barber_form_toggles_links() {
        let catalog = catalog();
        let mut form = CatalogForm::Barber(BarberForm::new(&catalog, None));
        assert_eq!(form.title(), "New barber");
        assert!(matches!(form.submit(), Err(FormError::Required("Name"))));

        if let Some(input) = form.focused_input() {
            input.set_text("Carlos");
        }
        form.next_field();
        assert!(!form.is_input_focused());
        // Check the second service, then the only slot
        form.handle_action(Action::MoveDown);
        form.handle_action(Action::ToggleSelect);
        form.next_field();
        form.handle_action(Action::ToggleSelect);

        let Ok(ApiRequest::SaveBarber(draft)) = form.submit() else {
            panic!("expected a barber draft");
        };
        assert_eq!(draft.name, "Carlos");
        assert_eq!(draft.service_ids, vec![11]);
        assert_eq!(draft.time_slot_ids, vec![100]);
    }

    #[test]
    fn test_existing_barber_links_start_checked() {
        let catalog = catalog();
        let barber = Barber {
            id: 1,
            name: "João".to_string(),
            image_path: Some("joao.png".to_string()),
            services: vec![catalog.services[0].clone()],
            time_slots: Vec::new(),
            deleted_at: None,
            created_at: None,
            updated_at: None,
        };
        let form = BarberForm::new(&catalog, Some(&barber));
        assert!(form.services[0].checked);
        assert!(!form.services[1].checked);
        assert!(!form.services[1].active);
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.id, Some(1));
        assert_eq!(draft.image_path.as_deref(), Some("joao.png"));
    }
}
