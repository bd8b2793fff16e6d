use super::models::{
    AmountResponse, AppointmentFilter, Barber, BarberDraft, BestSeller, BookingRequest,
    BookingResponse, BookingStage, CashOverview, CountResponse, DailySummary, Id, RateResponse,
    Service, ServiceDraft, TimeSlot, TimeSlotDraft,
};
use crate::config::Config;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// Non-2xx answer from the backend, with the body text it sent.
#[derive(Debug)]
pub struct StatusError {
    pub status: StatusCode,
    pub body: String,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error ({})", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

impl StatusError {
    /// True when `error` (or anything it wraps) is a response with `status`.
    pub fn has_status(error: &anyhow::Error, status: StatusCode) -> bool {
        error
            .chain()
            .filter_map(|cause| cause.downcast_ref::<StatusError>())
            .any(|e| e.status == status)
    }
}

/// Resource families that share the `/{resource}/{id}/ativar|desativar` routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Barbers,
    Services,
    TimeSlots,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Barbers => "barbeiros",
            Resource::Services => "servicos",
            Resource::TimeSlots => "horarios",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Barbers => "Barber",
            Resource::Services => "Service",
            Resource::TimeSlots => "Time slot",
        }
    }
}

/// HTTP client for the barbershop backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Request failed: {} {}", method, url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("API error: {} {} -> {}: {}", method, url, status, error_text);
            return Err(StatusError {
                status,
                body: error_text.trim().to_string(),
            }
            .into());
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from /{}", path))
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, Some(body)).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from /{}", path))
    }

    /// Fire a write whose response body is not needed.
    async fn send_ignore_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        self.send(method, path, body).await?;
        Ok(())
    }

    // ---- booking flow ----

    pub async fn list_barbers(&self) -> Result<Vec<Barber>> {
        let barbers: Vec<Barber> = self.get_json("barbeiros").await?;
        info!("Fetched {} barbers", barbers.len());
        Ok(barbers)
    }

    pub async fn available_slots(&self, date: NaiveDate, barber_id: Id) -> Result<Vec<TimeSlot>> {
        let path = format!(
            "horarios/disponiveis/{}/{}",
            date.format("%Y-%m-%d"),
            barber_id
        );
        let slots: Vec<TimeSlot> = self.get_json(&path).await?;
        info!(
            "Barber {} has {} free slots on {}",
            barber_id,
            slots.len(),
            date
        );
        Ok(slots)
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResponse> {
        info!(
            "Creating booking for barber {} on {} (slot {})",
            request.barber_id, request.day, request.time_slot_id
        );
        let booking: BookingResponse = self
            .send_json(Method::POST, "agendas", request)
            .await
            .context("Failed to create booking")?;
        info!("Booking {} created with stage {}", booking.id, booking.stage.wire_name());
        Ok(booking)
    }

    // ---- catalog ----

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        self.get_json("servicos").await
    }

    pub async fn list_time_slots(&self) -> Result<Vec<TimeSlot>> {
        self.get_json("horarios").await
    }

    pub async fn save_barber(&self, draft: &BarberDraft) -> Result<()> {
        let method = if draft.id.is_some() { Method::PUT } else { Method::POST };
        info!("Saving barber '{}' ({})", draft.name, method);
        self.send_ignore_body(method, "barbeiros", Some(&draft.body()))
            .await
            .context("Failed to save barber")
    }

    pub async fn save_service(&self, draft: &ServiceDraft) -> Result<()> {
        let method = if draft.id.is_some() { Method::PUT } else { Method::POST };
        info!("Saving service '{}' ({})", draft.description, method);
        self.send_ignore_body(method, "servicos", Some(&draft.body()))
            .await
            .context("Failed to save service")
    }

    pub async fn save_time_slot(&self, draft: &TimeSlotDraft) -> Result<()> {
        let method = if draft.id.is_some() { Method::PUT } else { Method::POST };
        info!("Saving time slot {}-{} ({})", draft.start, draft.end, method);
        self.send_ignore_body(method, "horarios", Some(&draft.body()))
            .await
            .context("Failed to save time slot")
    }

    /// `PUT /{resource}/{id}/ativar` or `/desativar`.
    pub async fn set_active(&self, resource: Resource, id: Id, active: bool) -> Result<()> {
        let verb = if active { "ativar" } else { "desativar" };
        let path = format!("{}/{}/{}", resource.path(), id, verb);
        info!("{} {} -> {}", resource.label(), id, verb);
        self.send_ignore_body::<()>(Method::PUT, &path, None).await
    }

    // ---- appointments ----

    pub async fn list_appointments(&self) -> Result<Vec<BookingResponse>> {
        self.get_json("agendas").await
    }

    pub async fn filter_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<BookingResponse>> {
        self.send_json(Method::POST, "agendas/filtro", filter).await
    }

    pub async fn update_stage(&self, id: Id, stage: BookingStage) -> Result<()> {
        info!("Appointment {} -> {}", id, stage.wire_name());
        let body = serde_json::json!({ "etapa": stage });
        self.send_ignore_body(Method::PUT, &format!("agendas/{}", id), Some(&body))
            .await
            .context("Failed to update appointment stage")
    }

    pub async fn cancel_appointment(&self, id: Id) -> Result<()> {
        info!("Canceling appointment {}", id);
        self.send_ignore_body::<()>(Method::PUT, &format!("agendas/{}/desativar", id), None)
            .await
            .context("Failed to cancel appointment")
    }

    // ---- cash ----

    pub async fn cash_overview(&self) -> Result<CashOverview> {
        let (revenue, total, today, ticket, rate, best_seller) = tokio::try_join!(
            self.get_json::<AmountResponse>("caixas/faturamento-total"),
            self.get_json::<CountResponse>("caixas/total-agendamentos"),
            self.get_json::<CountResponse>("caixas/agendamentos-hoje"),
            self.get_json::<AmountResponse>("caixas/ticket-medio"),
            self.get_json::<RateResponse>("caixas/taxa-cancelamento"),
            self.best_seller(),
        )?;

        Ok(CashOverview {
            total_revenue: revenue.value,
            total_appointments: total.total,
            appointments_today: today.total,
            average_ticket: ticket.value,
            cancellation_rate: rate.rate,
            best_seller,
        })
    }

    /// `None` when nothing has been sold yet, which the server answers with a 404.
    pub async fn best_seller(&self) -> Result<Option<BestSeller>> {
        match self.get_json::<BestSeller>("caixas/servico-mais-vendido").await {
            Ok(best) => Ok(Some(best)),
            Err(e) if StatusError::has_status(&e, StatusCode::NOT_FOUND) => {
                debug!("No best-selling service yet");
                Ok(None)
            }
            Err(e) => Err(e.context("Failed to load the best-selling service")),
        }
    }

    pub async fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary> {
        self.get_json(&format!("caixas/agendamentos-dia/{}", date.format("%Y-%m-%d")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/barbeiros"), "http://localhost:8080/barbeiros");
        assert_eq!(client.url("agendas/3"), "http://localhost:8080/agendas/3");
    }

    #[test]
    fn test_status_error_text_and_lookup() {
        let not_found = StatusError {
            status: StatusCode::NOT_FOUND,
            body: "Serviço não encontrado".to_string(),
        };
        assert_eq!(
            not_found.to_string(),
            "API error (404 Not Found): Serviço não encontrado"
        );
        let bare = StatusError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "API error (500 Internal Server Error)");

        let wrapped = anyhow::Error::from(not_found).context("Failed to load");
        assert!(StatusError::has_status(&wrapped, StatusCode::NOT_FOUND));
        assert!(!StatusError::has_status(&wrapped, StatusCode::CONFLICT));
        let plain = anyhow::anyhow!("connection refused");
        assert!(!StatusError::has_status(&plain, StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Barbers.path(), "barbeiros");
        assert_eq!(Resource::Services.path(), "servicos");
        assert_eq!(Resource::TimeSlots.path(), "horarios");
    }
}
