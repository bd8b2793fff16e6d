use super::error::StepError;
use super::step::Field;
use crate::api::models::{BookingRequest, Id};
use chrono::NaiveDate;

/// Key of the availability query: free slots depend on both barber and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub barber_id: Id,
    pub date: NaiveDate,
}

/// Values collected by the wizard. Every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub contact: String,
    pub barber_id: Option<Id>,
    pub service_id: Option<Id>,
    pub date: Option<NaiveDate>,
    pub time_slot_id: Option<Id>,
    pub name: String,
}

impl BookingForm {
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Contact => !self.contact.trim().is_empty(),
            Field::Barber => self.barber_id.is_some(),
            Field::Service => self.service_id.is_some(),
            Field::Date => self.date.is_some(),
            Field::TimeSlot => self.time_slot_id.is_some(),
            Field::Name => !self.name.trim().is_empty(),
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.is_set(*f))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == BookingForm::default()
    }

    pub fn slot_key(&self) -> Option<SlotKey> {
        Some(SlotKey {
            barber_id: self.barber_id?,
            date: self.date?,
        })
    }

    /// Build the POST body. Fails with the first missing field.
    pub fn to_request(&self) -> Result<BookingRequest, StepError> {
        if let Some(field) = self.missing_fields().into_iter().next() {
            return Err(StepError::Missing(field));
        }
        match (self.barber_id, self.service_id, self.time_slot_id, self.date) {
            (Some(barber_id), Some(service_id), Some(time_slot_id), Some(day)) => {
                Ok(BookingRequest {
                    name: self.name.trim().to_string(),
                    contact: self.contact.trim().to_string(),
                    barber_id,
                    service_id,
                    time_slot_id,
                    day,
                })
            }
            _ => Err(StepError::Missing(Field::Barber)),
        }
    }
}
