use super::step::{Field, WizardStep};
use crate::api::models::Id;
use chrono::NaiveDate;
use thiserror::Error;

/// Client-side validation failures. None of these reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("Barber {0} is not available")]
    UnknownBarber(Id),
    #[error("Choose a barber first")]
    NoBarber,
    #[error("Service {0} is not offered by this barber")]
    ServiceNotOffered(Id),
    #[error("Pick a date first")]
    NoDate,
    #[error("{0} is in the past")]
    DateInPast(NaiveDate),
    #[error("Available times are still loading")]
    SlotsLoading,
    #[error("Time slot {0} is not available on this date")]
    SlotUnavailable(Id),
    #[error("A booking is already being sent")]
    SubmissionInFlight,
    #[error("Not possible at the {0} step")]
    WrongStep(WizardStep),
    #[error("This booking is finished; start a new one")]
    Finished,
}
