//! The booking wizard state machine.
//!
//! The wizard never performs I/O. Operations that need the backend return a
//! [`WizardEffect`]; the host runs it and feeds the outcome back through the
//! `apply_*` methods. This keeps every transition synchronous and testable.

use super::error::StepError;
use super::form::{BookingForm, SlotKey};
use super::step::WizardStep;
use crate::api::models::{Barber, BookingRequest, BookingResponse, Id, Service, TimeSlot};
use crate::remote::{KeyedQuery, Remote, Resolution};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Backend work requested by a wizard transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    FetchBarbers,
    FetchSlots(SlotKey),
    Submit(BookingRequest),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submission {
    #[default]
    Idle,
    InFlight,
    /// Last attempt failed; the user may submit again.
    Failed(String),
}

/// Result of a transition: possibly an effect to run, or a validation error.
pub type Transition = Result<Option<WizardEffect>, StepError>;

/// The current selections resolved against loaded data, for review panels.
#[derive(Debug, Clone, Copy)]
pub struct BookingSummary<'a> {
    pub contact: &'a str,
    pub name: &'a str,
    pub barber: Option<&'a Barber>,
    pub service: Option<&'a Service>,
    pub time_slot: Option<&'a TimeSlot>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    today: NaiveDate,
    form: BookingForm,
    barbers: Remote<Vec<Barber>>,
    slots: KeyedQuery<SlotKey, Vec<TimeSlot>>,
    submission: Submission,
    confirmation: Option<BookingResponse>,
}

impl BookingWizard {
    /// A fresh wizard. Dates before `today` cannot be booked.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: WizardStep::Welcome,
            today,
            form: BookingForm::default(),
            barbers: Remote::Idle,
            slots: KeyedQuery::Idle,
            submission: Submission::Idle,
            confirmation: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn barbers(&self) -> &Remote<Vec<Barber>> {
        &self.barbers
    }

    pub fn slots(&self) -> &KeyedQuery<SlotKey, Vec<TimeSlot>> {
        &self.slots
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// The server's copy of the booking once submission succeeded.
    pub fn confirmation(&self) -> Option<&BookingResponse> {
        self.confirmation.as_ref()
    }

    /// Called when the wizard is mounted. Loads barbers unless already loaded.
    pub fn start(&mut self) -> Option<WizardEffect> {
        self.request_barbers()
    }

    fn request_barbers(&mut self) -> Option<WizardEffect> {
        if self.barbers.needs_fetch() {
            self.barbers = Remote::Loading;
            Some(WizardEffect::FetchBarbers)
        } else {
            None
        }
    }

    fn ensure_editable(&self) -> Result<(), StepError> {
        if self.step == WizardStep::Confirmation {
            return Err(StepError::Finished);
        }
        if self.submission == Submission::InFlight {
            return Err(StepError::SubmissionInFlight);
        }
        Ok(())
    }

    pub fn selected_barber(&self) -> Option<&Barber> {
        let id = self.form.barber_id?;
        self.barbers.value()?.iter().find(|b| b.id == id)
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.selected_barber()?.service(self.form.service_id?)
    }

    pub fn selected_time_slot(&self) -> Option<&TimeSlot> {
        let id = self.form.time_slot_id?;
        self.available_slots()?.iter().find(|s| s.id == id)
    }

    /// Services the customer can pick: exactly the selected barber's.
    pub fn services(&self) -> &[Service] {
        self.selected_barber()
            .map(|b| b.services.as_slice())
            .unwrap_or(&[])
    }

    /// Free slots for the current barber and date, once loaded.
    pub fn available_slots(&self) -> Option<&[TimeSlot]> {
        let key = self.form.slot_key()?;
        self.slots.value_for(&key).map(Vec::as_slice)
    }

    /// Slots to show. Before a date is picked this previews the barber's
    /// schedule; afterwards only the free slots for that day.
    pub fn displayed_slots(&self) -> &[TimeSlot] {
        if self.form.date.is_none() {
            return self
                .selected_barber()
                .map(|b| b.time_slots.as_slice())
                .unwrap_or(&[]);
        }
        self.available_slots().unwrap_or(&[])
    }

    pub fn slots_loading(&self) -> bool {
        self.slots.is_loading()
    }

    pub fn summary(&self) -> BookingSummary<'_> {
        BookingSummary {
            contact: &self.form.contact,
            name: &self.form.name,
            barber: self.selected_barber(),
            service: self.selected_service(),
            time_slot: self.selected_time_slot(),
            date: self.form.date,
        }
    }

    pub fn set_contact(&mut self, contact: impl Into<String>) -> Result<(), StepError> {
        self.ensure_editable()?;
        self.form.contact = contact.into();
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), StepError> {
        self.ensure_editable()?;
        self.form.name = name.into();
        Ok(())
    }

    /// Move to the next step if this step's field is filled.
    /// At `EnterName` this submits the booking.
    pub fn advance(&mut self) -> Transition {
        match self.step {
            WizardStep::Confirmation => return Err(StepError::Finished),
            WizardStep::EnterName => return self.submit(),
            _ => {}
        }
        self.ensure_editable()?;

        if let Some(field) = self.step.required_field() {
            if !self.form.is_set(field) {
                return Err(StepError::Missing(field));
            }
        }

        let next = self.step.next().ok_or(StepError::Finished)?;
        info!("Booking wizard: {} -> {}", self.step, next);
        self.step = next;

        Ok(match next {
            WizardStep::SelectBarber => self.request_barbers(),
            _ => None,
        })
    }

    pub fn back(&mut self) -> Result<(), StepError> {
        self.ensure_editable()?;
        let previous = self
            .step
            .previous()
            .ok_or(StepError::WrongStep(self.step))?;
        debug!("Booking wizard: back to {}", previous);
        self.step = previous;
        Ok(())
    }

    /// Choose a barber. A different barber invalidates the service and slot.
    pub fn select_barber(&mut self, id: Id) -> Transition {
        self.ensure_editable()?;
        let known = self
            .barbers
            .value()
            .is_some_and(|list| list.iter().any(|b| b.id == id));
        if !known {
            return Err(StepError::UnknownBarber(id));
        }
        if self.form.barber_id == Some(id) {
            return Ok(None);
        }

        debug!("Barber selected: {}", id);
        self.form.barber_id = Some(id);
        self.form.service_id = None;
        self.form.time_slot_id = None;
        Ok(self.requery_slots())
    }

    pub fn select_service(&mut self, id: Id) -> Result<(), StepError> {
        self.ensure_editable()?;
        let barber = self.selected_barber().ok_or(StepError::NoBarber)?;
        if barber.service(id).is_none() {
            return Err(StepError::ServiceNotOffered(id));
        }
        self.form.service_id = Some(id);
        Ok(())
    }

    /// Choose a day. A different day invalidates the slot and re-queries availability.
    pub fn select_date(&mut self, date: NaiveDate) -> Transition {
        self.ensure_editable()?;
        if date < self.today {
            return Err(StepError::DateInPast(date));
        }

        if self.form.date == Some(date) {
            // Same key: nothing to do unless the last query for it failed.
            match self.form.slot_key() {
                Some(key) if self.slots.tracks(&key) && self.slots.error().is_none() => {
                    return Ok(None)
                }
                None => return Ok(None),
                Some(_) => {}
            }
        }

        debug!("Date selected: {}", date);
        self.form.date = Some(date);
        self.form.time_slot_id = None;
        Ok(self.requery_slots())
    }

    pub fn select_slot(&mut self, id: Id) -> Result<(), StepError> {
        self.ensure_editable()?;
        if self.form.barber_id.is_none() {
            return Err(StepError::NoBarber);
        }
        let key = self.form.slot_key().ok_or(StepError::NoDate)?;
        if self.slots.is_loading() {
            return Err(StepError::SlotsLoading);
        }
        let free = self
            .slots
            .value_for(&key)
            .ok_or(StepError::SlotUnavailable(id))?;
        if !free.iter().any(|s| s.id == id) {
            return Err(StepError::SlotUnavailable(id));
        }
        self.form.time_slot_id = Some(id);
        Ok(())
    }

    /// Clear the slot and start the availability query for the current key.
    fn requery_slots(&mut self) -> Option<WizardEffect> {
        self.form.time_slot_id = None;
        match self.form.slot_key() {
            Some(key) => {
                self.slots.begin(key);
                Some(WizardEffect::FetchSlots(key))
            }
            None => {
                self.slots.reset();
                None
            }
        }
    }

    /// Re-issue the fetch behind the current step, e.g. after a failure.
    pub fn refresh(&mut self) -> Option<WizardEffect> {
        if self.ensure_editable().is_err() {
            return None;
        }
        match self.step {
            WizardStep::SelectBarber => {
                self.barbers = Remote::Loading;
                Some(WizardEffect::FetchBarbers)
            }
            WizardStep::SelectDate | WizardStep::SelectTime => self.requery_slots(),
            _ => None,
        }
    }

    /// Send the booking. A second call while one is in flight does nothing.
    pub fn submit(&mut self) -> Transition {
        if self.step != WizardStep::EnterName {
            return Err(StepError::WrongStep(self.step));
        }
        if self.submission == Submission::InFlight {
            return Ok(None);
        }
        let request = self.form.to_request()?;
        info!(
            "Submitting booking: barber {} service {} slot {} on {}",
            request.barber_id, request.service_id, request.time_slot_id, request.day
        );
        self.submission = Submission::InFlight;
        Ok(Some(WizardEffect::Submit(request)))
    }

    pub fn apply_barbers(&mut self, result: Result<Vec<Barber>, String>) -> Resolution {
        if !self.barbers.is_loading() {
            return Resolution::Stale;
        }
        if let Err(e) = &result {
            warn!("Failed to load barbers: {}", e);
        }
        self.barbers.resolve(result);
        self.revalidate_selection();
        Resolution::Applied
    }

    /// Drop selections that the freshly loaded barber list no longer supports.
    fn revalidate_selection(&mut self) {
        let Some(list) = self.barbers.value() else {
            return;
        };
        let Some(barber_id) = self.form.barber_id else {
            return;
        };
        match list.iter().find(|b| b.id == barber_id) {
            None => {
                debug!("Selected barber {} disappeared; clearing selection", barber_id);
                self.form.barber_id = None;
                self.form.service_id = None;
                self.form.time_slot_id = None;
                self.slots.reset();
            }
            Some(barber) => {
                if let Some(service_id) = self.form.service_id {
                    if barber.service(service_id).is_none() {
                        self.form.service_id = None;
                    }
                }
                if let Some(slot_id) = self.form.time_slot_id {
                    if !barber.offers_time_slot(slot_id) {
                        self.form.time_slot_id = None;
                    }
                }
            }
        }
    }

    /// Feed an availability response. Responses for any key other than the
    /// current (barber, date) are discarded.
    pub fn apply_slots(&mut self, key: SlotKey, result: Result<Vec<TimeSlot>, String>) -> Resolution {
        if self.form.slot_key() != Some(key) {
            debug!("Discarding stale availability for {:?}", key);
            return Resolution::Stale;
        }

        let result = result.map(|slots| match self.selected_barber() {
            Some(barber) => slots
                .into_iter()
                .filter(|s| barber.offers_time_slot(s.id))
                .collect(),
            None => slots,
        });

        let resolution = self.slots.resolve(&key, result);
        if resolution == Resolution::Applied {
            self.form.time_slot_id = None;
            if let Some(e) = self.slots.error() {
                warn!("Failed to load availability for {:?}: {}", key, e);
            }
        }
        resolution
    }

    pub fn apply_submission(&mut self, result: Result<BookingResponse, String>) -> Resolution {
        if self.submission != Submission::InFlight {
            return Resolution::Stale;
        }
        match result {
            Ok(booking) => {
                info!("Booking {} confirmed ({})", booking.id, booking.stage.wire_name());
                self.confirmation = Some(booking);
                self.submission = Submission::Idle;
                self.step = WizardStep::Confirmation;
            }
            Err(e) => {
                warn!("Booking submission failed: {}", e);
                self.submission = Submission::Failed(e);
            }
        }
        Resolution::Applied
    }

    /// Reset every field, go back to the start and reload barbers.
    pub fn restart(&mut self) -> WizardEffect {
        info!("Booking wizard restarted");
        *self = Self::new(self.today);
        self.barbers = Remote::Loading;
        WizardEffect::FetchBarbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Field;

    fn service(id: Id, description: &str, price: f64) -> Service {
        Service {
            id,
            description: description.to_string(),
            price,
            deleted_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn slot(id: Id, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            id,
            start: start.to_string(),
            end: end.to_string(),
            deleted_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn barber(id: Id, name: &str, services: Vec<Service>, time_slots: Vec<TimeSlot>) -> Barber {
        Barber {
            id,
            name: name.to_string(),
            image_path: None,
            services,
            time_slots,
            deleted_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn roster() -> Vec<Barber> {
        vec![
            barber(
                1,
                "João",
                vec![service(10, "Corte", 30.0), service(11, "Barba", 25.0)],
                vec![slot(100, "09:00", "10:00"), slot(101, "10:00", "11:00")],
            ),
            barber(
                2,
                "Pedro",
                vec![service(12, "Sobrancelha", 15.0)],
                vec![slot(102, "14:00", "15:00")],
            ),
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        today().succ_opt().unwrap()
    }

    /// Wizard at SelectBarber with the roster loaded.
    fn at_select_barber() -> BookingWizard {
        let mut wizard = BookingWizard::new(today());
        assert_eq!(wizard.start(), Some(WizardEffect::FetchBarbers));
        wizard.advance().unwrap();
        wizard.set_contact("(18)99999-0000").unwrap();
        assert_eq!(wizard.advance(), Ok(None));
        assert_eq!(wizard.apply_barbers(Ok(roster())), Resolution::Applied);
        wizard
    }

    /// Wizard at SelectTime with João, Corte and tomorrow chosen and slots loaded.
    fn at_select_time() -> BookingWizard {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        wizard.advance().unwrap();
        wizard.select_service(10).unwrap();
        wizard.advance().unwrap();
        let effect = wizard.select_date(tomorrow()).unwrap();
        let key = SlotKey {
            barber_id: 1,
            date: tomorrow(),
        };
        assert_eq!(effect, Some(WizardEffect::FetchSlots(key)));
        wizard.apply_slots(key, Ok(vec![slot(100, "09:00", "10:00")]));
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_start_fetches_barbers_once() {
        let mut wizard = BookingWizard::new(today());
        assert_eq!(wizard.start(), Some(WizardEffect::FetchBarbers));
        assert_eq!(wizard.start(), None);
        wizard.advance().unwrap();
        wizard.set_contact("123").unwrap();
        // Still loading from mount: entering the barber step does not refetch.
        assert_eq!(wizard.advance(), Ok(None));
        assert_eq!(wizard.step(), WizardStep::SelectBarber);
    }

    #[test]
    fn test_entering_barber_step_retries_failed_fetch() {
        let mut wizard = BookingWizard::new(today());
        wizard.start();
        wizard.apply_barbers(Err("connection refused".to_string()));
        wizard.advance().unwrap();
        wizard.set_contact("123").unwrap();
        assert_eq!(wizard.advance(), Ok(Some(WizardEffect::FetchBarbers)));
    }

    #[test]
    fn test_contact_is_required() {
        let mut wizard = BookingWizard::new(today());
        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(StepError::Missing(Field::Contact)));
        wizard.set_contact("  ").unwrap();
        assert_eq!(wizard.advance(), Err(StepError::Missing(Field::Contact)));
        assert_eq!(wizard.step(), WizardStep::Contact);
    }

    #[test]
    fn test_each_step_guards_its_field() {
        let mut wizard = at_select_barber();
        assert_eq!(wizard.advance(), Err(StepError::Missing(Field::Barber)));
        wizard.select_barber(1).unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(StepError::Missing(Field::Service)));
        wizard.select_service(11).unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(StepError::Missing(Field::Date)));
    }

    #[test]
    fn test_services_and_slots_match_selected_barber() {
        let mut wizard = at_select_barber();
        for b in roster() {
            wizard.select_barber(b.id).unwrap();
            assert_eq!(wizard.services(), b.services.as_slice());
            assert_eq!(wizard.displayed_slots(), b.time_slots.as_slice());
        }
    }

    #[test]
    fn test_service_from_other_barber_is_rejected() {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        assert_eq!(
            wizard.select_service(12),
            Err(StepError::ServiceNotOffered(12))
        );
        assert_eq!(wizard.form().service_id, None);
    }

    #[test]
    fn test_unknown_barber_is_rejected() {
        let mut wizard = at_select_barber();
        assert_eq!(wizard.select_barber(99), Err(StepError::UnknownBarber(99)));
    }

    #[test]
    fn test_changing_barber_clears_service_and_slot() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        wizard.back().unwrap();
        wizard.back().unwrap();
        wizard.back().unwrap();
        assert_eq!(wizard.step(), WizardStep::SelectBarber);

        let effect = wizard.select_barber(2).unwrap();
        assert_eq!(wizard.form().service_id, None);
        assert_eq!(wizard.form().time_slot_id, None);
        // Date is still set, so availability is re-queried for the new barber.
        assert_eq!(
            effect,
            Some(WizardEffect::FetchSlots(SlotKey {
                barber_id: 2,
                date: tomorrow()
            }))
        );
        assert!(wizard.slots_loading());
    }

    #[test]
    fn test_reselecting_same_barber_keeps_choices() {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        wizard.select_service(10).unwrap();
        assert_eq!(wizard.select_barber(1), Ok(None));
        assert_eq!(wizard.form().service_id, Some(10));
    }

    #[test]
    fn test_changing_date_clears_slot_before_response() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        wizard.back().unwrap();

        let later = tomorrow().succ_opt().unwrap();
        let effect = wizard.select_date(later).unwrap();
        assert_eq!(wizard.form().time_slot_id, None);
        assert!(wizard.slots_loading());
        assert!(matches!(effect, Some(WizardEffect::FetchSlots(k)) if k.date == later));
    }

    #[test]
    fn test_stale_availability_never_overwrites_current_key() {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        wizard.advance().unwrap();
        wizard.select_service(10).unwrap();
        wizard.advance().unwrap();

        let d1 = tomorrow();
        let d2 = d1.succ_opt().unwrap();
        let q1 = SlotKey { barber_id: 1, date: d1 };
        let q2 = SlotKey { barber_id: 1, date: d2 };

        wizard.select_date(d1).unwrap();
        wizard.select_date(d2).unwrap();

        // Q1 resolves late: ignored, still loading Q2.
        let resolution = wizard.apply_slots(q1, Ok(vec![slot(100, "09:00", "10:00")]));
        assert_eq!(resolution, Resolution::Stale);
        assert!(wizard.slots_loading());
        assert!(wizard.displayed_slots().is_empty());

        wizard.apply_slots(q2, Ok(vec![slot(101, "10:00", "11:00")]));
        let ids: Vec<Id> = wizard.displayed_slots().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![101]);

        // And once more after Q2 settled.
        wizard.apply_slots(q1, Ok(vec![slot(100, "09:00", "10:00")]));
        let ids: Vec<Id> = wizard.displayed_slots().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![101]);
    }

    #[test]
    fn test_availability_is_limited_to_barber_slots() {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        wizard.select_date(tomorrow()).unwrap();
        let key = SlotKey {
            barber_id: 1,
            date: tomorrow(),
        };
        wizard.apply_slots(
            key,
            Ok(vec![slot(100, "09:00", "10:00"), slot(102, "14:00", "15:00")]),
        );
        let ids: Vec<Id> = wizard.displayed_slots().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![100]);
        assert_eq!(wizard.select_slot(102), Err(StepError::SlotUnavailable(102)));
    }

    #[test]
    fn test_slot_selection_blocked_while_loading() {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        wizard.select_date(tomorrow()).unwrap();
        assert_eq!(wizard.select_slot(100), Err(StepError::SlotsLoading));
    }

    #[test]
    fn test_failed_availability_can_be_retried() {
        let mut wizard = at_select_barber();
        wizard.select_barber(1).unwrap();
        wizard.select_date(tomorrow()).unwrap();
        let key = SlotKey {
            barber_id: 1,
            date: tomorrow(),
        };
        wizard.apply_slots(key, Err("API error (500)".to_string()));
        assert_eq!(wizard.slots().error(), Some("API error (500)"));
        // Picking the same day again re-issues the query.
        assert_eq!(
            wizard.select_date(tomorrow()),
            Ok(Some(WizardEffect::FetchSlots(key)))
        );
    }

    #[test]
    fn test_past_dates_are_rejected() {
        let mut wizard = at_select_barber();
        let yesterday = today().pred_opt().unwrap();
        assert_eq!(
            wizard.select_date(yesterday),
            Err(StepError::DateInPast(yesterday))
        );
        assert_eq!(wizard.select_date(today()), Ok(None));
    }

    #[test]
    fn test_submit_requires_name() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::EnterName);
        assert_eq!(wizard.advance(), Err(StepError::Missing(Field::Name)));
        assert_eq!(wizard.submission(), &Submission::Idle);
    }

    #[test]
    fn test_submit_only_from_name_step() {
        let mut wizard = at_select_time();
        assert_eq!(
            wizard.submit(),
            Err(StepError::WrongStep(WizardStep::SelectTime))
        );
    }

    #[test]
    fn test_double_submit_is_noop() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        wizard.advance().unwrap();
        wizard.set_name("Maria").unwrap();
        assert!(matches!(wizard.advance(), Ok(Some(WizardEffect::Submit(_)))));
        assert_eq!(wizard.advance(), Ok(None));
        assert_eq!(wizard.set_name("Other"), Err(StepError::SubmissionInFlight));
    }

    #[test]
    fn test_failed_submission_stays_on_name_step() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        wizard.advance().unwrap();
        wizard.set_name("Maria").unwrap();
        wizard.advance().unwrap();

        wizard.apply_submission(Err("API error (409 Conflict)".to_string()));
        assert_eq!(wizard.step(), WizardStep::EnterName);
        assert_eq!(
            wizard.submission(),
            &Submission::Failed("API error (409 Conflict)".to_string())
        );
        assert_eq!(wizard.form().name, "Maria");
        // Retry is allowed.
        assert!(matches!(wizard.submit(), Ok(Some(WizardEffect::Submit(_)))));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        assert_eq!(wizard.restart(), WizardEffect::FetchBarbers);
        assert_eq!(wizard.step(), WizardStep::Welcome);
        assert!(wizard.form().is_empty());
        assert!(wizard.barbers().is_loading());
        assert_eq!(wizard.slots(), &KeyedQuery::Idle);
        assert!(wizard.confirmation().is_none());
    }

    #[test]
    fn test_confirmation_is_terminal() {
        let mut wizard = at_select_time();
        wizard.select_slot(100).unwrap();
        wizard.advance().unwrap();
        wizard.set_name("Maria").unwrap();
        let Ok(Some(WizardEffect::Submit(request))) = wizard.advance() else {
            panic!("expected a submit effect");
        };
        let booking = BookingResponse {
            id: 1,
            name: request.name.clone(),
            contact: request.contact.clone(),
            barber: crate::api::models::BarberSnapshot {
                id: 1,
                name: "João".to_string(),
                image_path: None,
            },
            service: service(10, "Corte", 30.0),
            time_slot: slot(100, "09:00", "10:00"),
            day: request.day.to_string(),
            price: 30.0,
            stage: crate::api::models::BookingStage::Pending,
        };
        wizard.apply_submission(Ok(booking));

        assert_eq!(wizard.step(), WizardStep::Confirmation);
        assert_eq!(wizard.advance(), Err(StepError::Finished));
        assert_eq!(wizard.back(), Err(StepError::Finished));
        assert_eq!(wizard.select_barber(2), Err(StepError::Finished));
        assert_eq!(wizard.confirmation().map(|b| b.price), Some(30.0));
    }

    #[test]
    fn test_reloaded_roster_drops_missing_barber() {
        let mut wizard = at_select_barber();
        wizard.select_barber(2).unwrap();
        assert!(wizard.refresh().is_some());
        wizard.apply_barbers(Ok(vec![roster().remove(0)]));
        assert_eq!(wizard.form().barber_id, None);
    }
}
