//! Booking flow: a linear, step-gated wizard that collects contact, barber,
//! service, date, time slot and name, then submits an appointment.

mod error;
mod form;
mod step;
mod wizard;

pub use error::StepError;
pub use form::{BookingForm, SlotKey};
pub use step::{Field, WizardStep};
pub use wizard::{BookingSummary, BookingWizard, Submission, Transition, WizardEffect};
