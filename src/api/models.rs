//! Wire models for the barbershop REST API.
//!
//! Field names on the wire are Portuguese (`nome`, `servicos`, `etapa`, ...);
//! the Rust side uses English names and maps them with serde renames.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier type used by every entity on the server.
pub type Id = i64;

/// A paid service offered by the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Id,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(rename = "deletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Service {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A bookable time window, e.g. `09:00` to `10:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Id,
    #[serde(rename = "horarioInicio")]
    pub start: String,
    #[serde(rename = "horarioFim")]
    pub end: String,
    #[serde(rename = "deletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TimeSlot {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// `HH:MM - HH:MM`, dropping any seconds the server appends.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            crate::utils::format::hour(&self.start),
            crate::utils::format::hour(&self.end)
        )
    }
}

/// A barber together with the services and time slots they offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "caminhoImagem", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(rename = "servicos", default)]
    pub services: Vec<Service>,
    #[serde(rename = "horarios", default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(rename = "deletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Barber {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn service(&self, id: Id) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn time_slot(&self, id: Id) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|h| h.id == id)
    }

    pub fn offers_time_slot(&self, id: Id) -> bool {
        self.time_slot(id).is_some()
    }
}

/// Payload for `POST /agendas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "contato")]
    pub contact: String,
    #[serde(rename = "barbeiroId")]
    pub barber_id: Id,
    #[serde(rename = "servicoId")]
    pub service_id: Id,
    #[serde(rename = "horarioId")]
    pub time_slot_id: Id,
    /// Serialized as `YYYY-MM-DD`.
    #[serde(rename = "dia")]
    pub day: NaiveDate,
}

/// Lifecycle stage of an appointment (`etapa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStage {
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "CANCELADO")]
    Canceled,
    #[serde(rename = "CONCLUIDO")]
    Completed,
    /// Any value this client does not know about.
    #[serde(other)]
    Unknown,
}

impl BookingStage {
    /// Stages an operator can move an appointment to.
    pub const ALL: [BookingStage; 4] = [
        BookingStage::Pending,
        BookingStage::Confirmed,
        BookingStage::Canceled,
        BookingStage::Completed,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            BookingStage::Pending => "PENDENTE",
            BookingStage::Confirmed => "CONFIRMADO",
            BookingStage::Canceled => "CANCELADO",
            BookingStage::Completed => "CONCLUIDO",
            BookingStage::Unknown => "DESCONHECIDO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStage::Pending => "Pendente",
            BookingStage::Confirmed => "Confirmado",
            BookingStage::Canceled => "Cancelado",
            BookingStage::Completed => "Concluído",
            BookingStage::Unknown => "Desconhecido",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BookingStage::Pending => "Awaiting confirmation",
            BookingStage::Confirmed => "Appointment confirmed",
            BookingStage::Canceled => "Appointment canceled",
            BookingStage::Completed => "Service delivered",
            BookingStage::Unknown => "Unrecognized stage",
        }
    }
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookingStage {
    type Err = String;

    /// Accepts wire names (`CONFIRMADO`) and English names (`confirmed`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" | "pending" => Ok(BookingStage::Pending),
            "confirmado" | "confirmed" => Ok(BookingStage::Confirmed),
            "cancelado" | "canceled" | "cancelled" => Ok(BookingStage::Canceled),
            "concluido" | "concluído" | "completed" | "done" => Ok(BookingStage::Completed),
            other => Err(format!("Unknown booking stage: {}", other)),
        }
    }
}

/// Barber snapshot embedded in an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarberSnapshot {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "caminhoImagem", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

/// An appointment as stored by the server (`AgendamentoResponse`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "contato")]
    pub contact: String,
    #[serde(rename = "registroBarbeiro")]
    pub barber: BarberSnapshot,
    #[serde(rename = "registroServico")]
    pub service: Service,
    #[serde(rename = "registroHorario")]
    pub time_slot: TimeSlot,
    /// Kept verbatim; some deployments send a full timestamp here.
    #[serde(rename = "dia")]
    pub day: String,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(rename = "etapa")]
    pub stage: BookingStage,
}

impl BookingResponse {
    /// Calendar day of the appointment, when the server sent a parseable date.
    pub fn date(&self) -> Option<NaiveDate> {
        let prefix = self.day.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }
}

/// Create (`id == None`) or update payload for a barber.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarberDraft {
    pub id: Option<Id>,
    pub name: String,
    pub image_path: Option<String>,
    pub service_ids: Vec<Id>,
    pub time_slot_ids: Vec<Id>,
}

impl BarberDraft {
    pub fn from_barber(barber: &Barber) -> Self {
        Self {
            id: Some(barber.id),
            name: barber.name.clone(),
            image_path: barber.image_path.clone(),
            service_ids: barber.services.iter().map(|s| s.id).collect(),
            time_slot_ids: barber.time_slots.iter().map(|h| h.id).collect(),
        }
    }

    /// JSON body for `POST /barbeiros` or `PUT /barbeiros`.
    pub fn body(&self) -> serde_json::Value {
        match self.id {
            None => serde_json::json!({
                "nome": self.name,
                "servicos": self.service_ids,
                "horarios": self.time_slot_ids,
            }),
            Some(id) => serde_json::json!({
                "id": id,
                "nome": self.name,
                "caminhoImagem": self.image_path,
                "servicos": self.service_ids,
                "horarios": self.time_slot_ids,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceDraft {
    pub id: Option<Id>,
    pub description: String,
    pub price: f64,
}

impl ServiceDraft {
    pub fn body(&self) -> serde_json::Value {
        match self.id {
            None => serde_json::json!({
                "descricao": self.description,
                "valor": self.price,
            }),
            Some(id) => serde_json::json!({
                "id": id,
                "descricao": self.description,
                "valor": self.price,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSlotDraft {
    pub id: Option<Id>,
    pub start: String,
    pub end: String,
}

impl TimeSlotDraft {
    /// Creation uses `horaInicio`/`horaFim`; updates send the stored field names.
    pub fn body(&self) -> serde_json::Value {
        match self.id {
            None => serde_json::json!({
                "horaInicio": self.start,
                "horaFim": self.end,
            }),
            Some(id) => serde_json::json!({
                "id": id,
                "horarioInicio": self.start,
                "horarioFim": self.end,
            }),
        }
    }
}

/// Filter for `POST /agendas/filtro`. Unset fields are left out of the body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppointmentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "contato", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "dia", skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
    #[serde(rename = "valor", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "etapa", skip_serializing_if = "Option::is_none")]
    pub stage: Option<BookingStage>,
}

impl AppointmentFilter {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.contact.is_none()
            && self.day.is_none()
            && self.price.is_none()
            && self.stage.is_none()
    }

    /// Number of active criteria, shown next to the filter hint.
    pub fn active_count(&self) -> usize {
        [
            self.id.is_some(),
            self.name.is_some(),
            self.contact.is_some(),
            self.day.is_some(),
            self.price.is_some(),
            self.stage.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AmountResponse {
    #[serde(rename = "valor")]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CountResponse {
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RateResponse {
    #[serde(rename = "taxa")]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BestSeller {
    #[serde(rename = "descricaoDoServico")]
    pub description: String,
    #[serde(rename = "valorServico")]
    pub price: f64,
    #[serde(rename = "porcentagemDeVendas")]
    pub share_percent: f64,
    #[serde(rename = "quantidadeDeVendas")]
    pub sales: i64,
}

/// Aggregated cash figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CashOverview {
    pub total_revenue: f64,
    pub total_appointments: i64,
    pub appointments_today: i64,
    pub average_ticket: f64,
    pub cancellation_rate: f64,
    pub best_seller: Option<BestSeller>,
}

/// Per-stage appointment counts for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct DailySummary {
    #[serde(rename = "agendasPendentes", default)]
    pub pending: i64,
    #[serde(rename = "agendasConfirmados", default)]
    pub confirmed: i64,
    #[serde(rename = "agendasCancelados", default)]
    pub canceled: i64,
    #[serde(rename = "agendasConcluidos", default)]
    pub completed: i64,
}

impl DailySummary {
    pub fn total(&self) -> i64 {
        self.pending + self.confirmed + self.canceled + self.completed
    }

    pub fn count(&self, stage: BookingStage) -> i64 {
        match stage {
            BookingStage::Pending => self.pending,
            BookingStage::Confirmed => self.confirmed,
            BookingStage::Canceled => self.canceled,
            BookingStage::Completed => self.completed,
            BookingStage::Unknown => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_request_wire_format() {
        let request = BookingRequest {
            name: "Maria".to_string(),
            contact: "(18)99999-0000".to_string(),
            barber_id: 1,
            service_id: 10,
            time_slot_id: 100,
            day: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nome": "Maria",
                "contato": "(18)99999-0000",
                "barbeiroId": 1,
                "servicoId": 10,
                "horarioId": 100,
                "dia": "2026-10-20",
            })
        );
    }

    #[test]
    fn test_barber_without_nested_lists() {
        let barber: Barber = serde_json::from_str(r#"{"id": 3, "nome": "Pedro"}"#).unwrap();
        assert!(barber.services.is_empty());
        assert!(barber.time_slots.is_empty());
        assert!(barber.is_active());
    }

    #[test]
    fn test_unknown_stage_does_not_fail() {
        let stage: BookingStage = serde_json::from_str("\"REAGENDADO\"").unwrap();
        assert_eq!(stage, BookingStage::Unknown);
        let stage: BookingStage = serde_json::from_str("\"CONCLUIDO\"").unwrap();
        assert_eq!(stage, BookingStage::Completed);
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!("confirmado".parse::<BookingStage>(), Ok(BookingStage::Confirmed));
        assert_eq!("CANCELLED".parse::<BookingStage>(), Ok(BookingStage::Canceled));
        assert!("maybe".parse::<BookingStage>().is_err());
    }

    #[test]
    fn test_booking_response_date_accepts_timestamp() {
        let json = serde_json::json!({
            "id": 7,
            "nome": "Maria",
            "contato": "18999990000",
            "registroBarbeiro": {"id": 1, "nome": "João"},
            "registroServico": {"id": 10, "descricao": "Corte", "valor": 30.0},
            "registroHorario": {"id": 100, "horarioInicio": "09:00:00", "horarioFim": "10:00:00"},
            "dia": "2026-10-20T00:00:00",
            "valor": 30.0,
            "etapa": "PENDENTE"
        });
        let booking: BookingResponse = serde_json::from_value(json).unwrap();
        assert_eq!(booking.date(), NaiveDate::from_ymd_opt(2026, 10, 20));
        assert_eq!(booking.time_slot.label(), "09:00 - 10:00");
    }

    #[test]
    fn test_drafts_switch_body_on_id() {
        let mut draft = TimeSlotDraft {
            id: None,
            start: "09:00".to_string(),
            end: "10:00".to_string(),
        };
        assert!(draft.body().get("horaInicio").is_some());
        draft.id = Some(4);
        assert_eq!(draft.body()["horarioFim"], "10:00");

        let barber = BarberDraft {
            id: None,
            name: "João".to_string(),
            image_path: None,
            service_ids: vec![1, 2],
            time_slot_ids: vec![3],
        };
        assert!(barber.body().get("id").is_none());
        assert_eq!(barber.body()["servicos"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_filter_skips_unset_fields() {
        let filter = AppointmentFilter {
            stage: Some(BookingStage::Confirmed),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"etapa": "CONFIRMADO"})
        );
        assert_eq!(filter.active_count(), 1);
        assert!(AppointmentFilter::default().is_empty());
    }
}
