//! Request/response envelopes exchanged between screens and the async runtime.
//!
//! Screens never await anything. They describe the call they want as an
//! [`ApiRequest`]; the app executes it on the tokio runtime and hands back an
//! [`ApiResponse`] carrying the same identifying data (keys, ids, dates) so the
//! receiving screen can tell whether the answer is still relevant.

use super::client::{ApiClient, Resource};
use super::models::{
    AppointmentFilter, Barber, BarberDraft, BookingRequest, BookingResponse, BookingStage,
    CashOverview, DailySummary, Id, Service, ServiceDraft, TimeSlot, TimeSlotDraft,
};
use crate::booking::{SlotKey, WizardEffect};
use chrono::NaiveDate;

/// Everything the admin catalog screen shows, fetched together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub barbers: Vec<Barber>,
    pub services: Vec<Service>,
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    ListBarbers,
    ListServices,
    AvailableSlots(SlotKey),
    CreateBooking(BookingRequest),
    LoadCatalog,
    SaveBarber(BarberDraft),
    SaveService(ServiceDraft),
    SaveTimeSlot(TimeSlotDraft),
    SetActive {
        resource: Resource,
        id: Id,
        active: bool,
    },
    ListAppointments,
    FilterAppointments(AppointmentFilter),
    UpdateStage {
        id: Id,
        stage: BookingStage,
    },
    CancelAppointment(Id),
    CashOverview,
    DailySummary(NaiveDate),
}

/// Completed call. Errors are flattened to display strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Barbers(Result<Vec<Barber>, String>),
    Services(Result<Vec<Service>, String>),
    Slots {
        key: SlotKey,
        result: Result<Vec<TimeSlot>, String>,
    },
    BookingCreated(Result<BookingResponse, String>),
    Catalog(Result<Catalog, String>),
    Saved {
        what: String,
        result: Result<(), String>,
    },
    Appointments {
        filtered: bool,
        result: Result<Vec<BookingResponse>, String>,
    },
    StageUpdated {
        id: Id,
        stage: BookingStage,
        result: Result<(), String>,
    },
    AppointmentCanceled {
        id: Id,
        result: Result<(), String>,
    },
    CashOverview(Result<CashOverview, String>),
    DailySummary {
        date: NaiveDate,
        result: Result<DailySummary, String>,
    },
}

fn flatten<T>(result: anyhow::Result<T>) -> Result<T, String> {
    result.map_err(|e| format!("{:#}", e))
}

impl From<WizardEffect> for ApiRequest {
    fn from(effect: WizardEffect) -> Self {
        match effect {
            WizardEffect::FetchBarbers => ApiRequest::ListBarbers,
            WizardEffect::FetchSlots(key) => ApiRequest::AvailableSlots(key),
            WizardEffect::Submit(request) => ApiRequest::CreateBooking(request),
        }
    }
}

impl ApiRequest {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::ListBarbers => "list barbers",
            ApiRequest::ListServices => "list services",
            ApiRequest::AvailableSlots(_) => "available slots",
            ApiRequest::CreateBooking(_) => "create booking",
            ApiRequest::LoadCatalog => "load catalog",
            ApiRequest::SaveBarber(_) => "save barber",
            ApiRequest::SaveService(_) => "save service",
            ApiRequest::SaveTimeSlot(_) => "save time slot",
            ApiRequest::SetActive { .. } => "toggle active",
            ApiRequest::ListAppointments => "list appointments",
            ApiRequest::FilterAppointments(_) => "filter appointments",
            ApiRequest::UpdateStage { .. } => "update stage",
            ApiRequest::CancelAppointment(_) => "cancel appointment",
            ApiRequest::CashOverview => "cash overview",
            ApiRequest::DailySummary(_) => "daily summary",
        }
    }

    /// Toast text for requests answered with [`ApiResponse::Saved`].
    fn saved_label(&self) -> String {
        match self {
            ApiRequest::SaveBarber(draft) => format!("Barber '{}'", draft.name),
            ApiRequest::SaveService(draft) => format!("Service '{}'", draft.description),
            ApiRequest::SaveTimeSlot(draft) => format!("Time slot {} - {}", draft.start, draft.end),
            ApiRequest::SetActive {
                resource,
                id,
                active,
            } => format!(
                "{} {} {}",
                resource.label(),
                id,
                if *active { "activated" } else { "deactivated" }
            ),
            other => other.name().to_string(),
        }
    }

    /// The response this request gets when it fails with `message`.
    ///
    /// Carries the same keys as a real answer, so the issuing screen
    /// can settle whatever it was waiting on.
    pub fn failed(self, message: impl Into<String>) -> ApiResponse {
        let message = message.into();
        let what = self.saved_label();
        match self {
            ApiRequest::ListBarbers => ApiResponse::Barbers(Err(message)),
            ApiRequest::ListServices => ApiResponse::Services(Err(message)),
            ApiRequest::AvailableSlots(key) => ApiResponse::Slots {
                key,
                result: Err(message),
            },
            ApiRequest::CreateBooking(_) => ApiResponse::BookingCreated(Err(message)),
            ApiRequest::LoadCatalog => ApiResponse::Catalog(Err(message)),
            ApiRequest::SaveBarber(_)
            | ApiRequest::SaveService(_)
            | ApiRequest::SaveTimeSlot(_)
            | ApiRequest::SetActive { .. } => ApiResponse::Saved {
                what,
                result: Err(message),
            },
            ApiRequest::ListAppointments => ApiResponse::Appointments {
                filtered: false,
                result: Err(message),
            },
            ApiRequest::FilterAppointments(_) => ApiResponse::Appointments {
                filtered: true,
                result: Err(message),
            },
            ApiRequest::UpdateStage { id, stage } => ApiResponse::StageUpdated {
                id,
                stage,
                result: Err(message),
            },
            ApiRequest::CancelAppointment(id) => ApiResponse::AppointmentCanceled {
                id,
                result: Err(message),
            },
            ApiRequest::CashOverview => ApiResponse::CashOverview(Err(message)),
            ApiRequest::DailySummary(date) => ApiResponse::DailySummary {
                date,
                result: Err(message),
            },
        }
    }

    pub async fn execute(self, client: &ApiClient) -> ApiResponse {
        let what = self.saved_label();
        match self {
            ApiRequest::ListBarbers => ApiResponse::Barbers(flatten(client.list_barbers().await)),
            ApiRequest::ListServices => {
                ApiResponse::Services(flatten(client.list_services().await))
            }
            ApiRequest::AvailableSlots(key) => ApiResponse::Slots {
                key,
                result: flatten(client.available_slots(key.date, key.barber_id).await),
            },
            ApiRequest::CreateBooking(request) => {
                ApiResponse::BookingCreated(flatten(client.create_booking(&request).await))
            }
            ApiRequest::LoadCatalog => {
                let result = tokio::try_join!(
                    client.list_barbers(),
                    client.list_services(),
                    client.list_time_slots()
                )
                .map(|(barbers, services, time_slots)| Catalog {
                    barbers,
                    services,
                    time_slots,
                });
                ApiResponse::Catalog(flatten(result))
            }
            ApiRequest::SaveBarber(draft) => ApiResponse::Saved {
                what,
                result: flatten(client.save_barber(&draft).await),
            },
            ApiRequest::SaveService(draft) => ApiResponse::Saved {
                what,
                result: flatten(client.save_service(&draft).await),
            },
            ApiRequest::SaveTimeSlot(draft) => ApiResponse::Saved {
                what,
                result: flatten(client.save_time_slot(&draft).await),
            },
            ApiRequest::SetActive {
                resource,
                id,
                active,
            } => ApiResponse::Saved {
                what,
                result: flatten(client.set_active(resource, id, active).await),
            },
            ApiRequest::ListAppointments => ApiResponse::Appointments {
                filtered: false,
                result: flatten(client.list_appointments().await),
            },
            ApiRequest::FilterAppointments(filter) => ApiResponse::Appointments {
                filtered: true,
                result: flatten(client.filter_appointments(&filter).await),
            },
            ApiRequest::UpdateStage { id, stage } => ApiResponse::StageUpdated {
                id,
                stage,
                result: flatten(client.update_stage(id, stage).await),
            },
            ApiRequest::CancelAppointment(id) => ApiResponse::AppointmentCanceled {
                id,
                result: flatten(client.cancel_appointment(id).await),
            },
            ApiRequest::CashOverview => {
                ApiResponse::CashOverview(flatten(client.cash_overview().await))
            }
            ApiRequest::DailySummary(date) => ApiResponse::DailySummary {
                date,
                result: flatten(client.daily_summary(date).await),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_effects_map_to_requests() {
        let key = SlotKey {
            barber_id: 4,
            date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
        };
        assert_eq!(
            ApiRequest::from(WizardEffect::FetchBarbers),
            ApiRequest::ListBarbers
        );
        assert_eq!(
            ApiRequest::from(WizardEffect::FetchSlots(key)),
            ApiRequest::AvailableSlots(key)
        );
    }

    #[test]
    fn test_flatten_keeps_context_chain() {
        let err: anyhow::Result<()> =
            Err(anyhow::anyhow!("API error (500)")).map_err(|e| e.context("Failed to create booking"));
        assert_eq!(
            flatten(err),
            Err("Failed to create booking: API error (500)".to_string())
        );
    }

    #[test]
    fn test_failed_response_keeps_request_keys() {
        let key = SlotKey {
            barber_id: 2,
            date: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
        };
        assert_eq!(
            ApiRequest::AvailableSlots(key).failed("gone"),
            ApiResponse::Slots {
                key,
                result: Err("gone".to_string()),
            }
        );
        assert_eq!(
            ApiRequest::UpdateStage {
                id: 7,
                stage: BookingStage::Confirmed,
            }
            .failed("gone"),
            ApiResponse::StageUpdated {
                id: 7,
                stage: BookingStage::Confirmed,
                result: Err("gone".to_string()),
            }
        );
        assert_eq!(
            ApiRequest::SetActive {
                resource: Resource::Services,
                id: 3,
                active: false,
            }
            .failed("gone"),
            ApiResponse::Saved {
                what: "Service 3 deactivated".to_string(),
                result: Err("gone".to_string()),
            }
        );
    }
}
