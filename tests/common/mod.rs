//! Shared test utilities: an in-process barbershop backend.
//!
//! `MockShop::spawn()` starts an axum server on `127.0.0.1:0` in a thread
//! with its own runtime, so it works from plain `#[test]`s (where the code
//! under test owns a runtime) as well as from `#[tokio::test]`s.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use barbershop::api::models::{
    Barber, BarberSnapshot, BookingRequest, BookingResponse, BookingStage, Id, Service, TimeSlot,
};
use barbershop::ApiClient;
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn service(id: Id, description: &str, price: f64) -> Service {
    Service {
        id,
        description: description.to_string(),
        price,
        deleted_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn slot(id: Id, start: &str, end: &str) -> TimeSlot {
    TimeSlot {
        id,
        start: start.to_string(),
        end: end.to_string(),
        deleted_at: None,
        created_at: None,
        updated_at: None,
    }
}

/// João cuts (Corte, R$ 30) and shaves (Barba, R$ 25) from 09:00 to 11:00.
/// Pedro is deactivated.
pub fn default_barbers() -> Vec<Barber> {
    vec![
        Barber {
            id: 1,
            name: "João".to_string(),
            image_path: None,
            services: vec![service(1, "Corte", 30.0), service(2, "Barba", 25.0)],
            time_slots: vec![
                slot(10, "09:00:00", "10:00:00"),
                slot(11, "10:00:00", "11:00:00"),
            ],
            deleted_at: None,
            created_at: None,
            updated_at: None,
        },
        Barber {
            id: 2,
            name: "Pedro".to_string(),
            image_path: None,
            services: vec![service(1, "Corte", 30.0)],
            time_slots: vec![slot(10, "09:00:00", "10:00:00")],
            deleted_at: Some("2026-01-10T12:00:00Z".to_string()),
            created_at: None,
            updated_at: None,
        },
    ]
}

/// The shop's catalog: Corte and Barba on offer, Pigmentação retired.
pub fn default_services() -> Vec<Service> {
    let mut retired = service(3, "Pigmentação", 45.0);
    retired.deleted_at = Some("2026-03-01T09:00:00Z".to_string());
    vec![service(1, "Corte", 30.0), service(2, "Barba", 25.0), retired]
}

#[derive(Debug, Default)]
pub struct ShopState {
    pub barbers: Vec<Barber>,
    pub services: Vec<Service>,
    pub appointments: Vec<BookingResponse>,
    /// Availability for these days answers only after `slow_delay`
    pub slow_dates: Vec<NaiveDate>,
    pub slow_delay: Duration,
    /// Reject every booking with this message and a 409
    pub reject_bookings: Option<String>,
    /// Best seller answers 500 instead of computing anything
    pub broken_best_seller: bool,
    /// Requests seen, as `METHOD /path`
    pub log: Vec<String>,
}

type Shared = Arc<Mutex<ShopState>>;

pub struct MockShop {
    pub base_url: String,
    pub state: Shared,
}

impl MockShop {
    pub fn spawn() -> Self {
        Self::spawn_with(ShopState {
            barbers: default_barbers(),
            services: default_services(),
            ..ShopState::default()
        })
    }

    pub fn spawn_with(state: ShopState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = router(state.clone());
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone(), Duration::from_secs(5)).unwrap()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut ShopState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn requests(&self) -> Vec<String> {
        self.with_state(|s| s.log.clone())
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/barbeiros", get(list_barbers))
        .route("/barbeiros/:id/:verb", put(toggle_barber))
        .route("/servicos", get(list_services))
        .route("/horarios/disponiveis/:date/:barber", get(available_slots))
        .route("/agendas", get(list_appointments).post(create_booking))
        .route("/agendas/filtro", post(filter_appointments))
        .route("/agendas/:id", put(update_stage))
        .route("/agendas/:id/desativar", put(cancel_appointment))
        .route("/caixas/faturamento-total", get(revenue))
        .route("/caixas/total-agendamentos", get(total_appointments))
        .route("/caixas/agendamentos-hoje", get(appointments_today))
        .route("/caixas/ticket-medio", get(average_ticket))
        .route("/caixas/taxa-cancelamento", get(cancellation_rate))
        .route("/caixas/servico-mais-vendido", get(best_seller))
        .route("/caixas/agendamentos-dia/:date", get(daily_summary))
        .with_state(state)
}

fn record(state: &Shared, entry: String) {
    state.lock().unwrap().log.push(entry);
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} não encontrado", what))
}

async fn list_barbers(State(state): State<Shared>) -> Json<Vec<Barber>> {
    record(&state, "GET /barbeiros".to_string());
    Json(state.lock().unwrap().barbers.clone())
}

async fn list_services(State(state): State<Shared>) -> Json<Vec<Service>> {
    record(&state, "GET /servicos".to_string());
    Json(state.lock().unwrap().services.clone())
}

async fn toggle_barber(
    State(state): State<Shared>,
    Path((id, verb)): Path<(Id, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    record(&state, format!("PUT /barbeiros/{}/{}", id, verb));
    let mut shop = state.lock().unwrap();
    let barber = shop
        .barbers
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| not_found("Barbeiro"))?;
    barber.deleted_at = match verb.as_str() {
        "ativar" => None,
        "desativar" => Some("2026-10-19T10:00:00Z".to_string()),
        _ => return Err((StatusCode::BAD_REQUEST, "verbo inválido".to_string())),
    };
    Ok(StatusCode::NO_CONTENT)
}

async fn available_slots(
    State(state): State<Shared>,
    Path((date, barber_id)): Path<(NaiveDate, Id)>,
) -> Result<Json<Vec<TimeSlot>>, (StatusCode, String)> {
    record(&state, format!("GET /horarios/disponiveis/{}/{}", date, barber_id));
    let delay = {
        let shop = state.lock().unwrap();
        shop.slow_dates.contains(&date).then_some(shop.slow_delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let shop = state.lock().unwrap();
    let barber = shop
        .barbers
        .iter()
        .find(|b| b.id == barber_id)
        .ok_or_else(|| not_found("Barbeiro"))?;
    let taken: Vec<Id> = shop
        .appointments
        .iter()
        .filter(|a| a.barber.id == barber_id && a.date() == Some(date))
        .filter(|a| a.stage != BookingStage::Canceled)
        .map(|a| a.time_slot.id)
        .collect();
    Ok(Json(
        barber
            .time_slots
            .iter()
            .filter(|s| !taken.contains(&s.id))
            .cloned()
            .collect(),
    ))
}

async fn create_booking(
    State(state): State<Shared>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), (StatusCode, String)> {
    record(&state, "POST /agendas".to_string());
    let mut shop = state.lock().unwrap();
    if let Some(message) = &shop.reject_bookings {
        return Err((StatusCode::CONFLICT, message.clone()));
    }
    let barber = shop
        .barbers
        .iter()
        .find(|b| b.id == request.barber_id)
        .ok_or_else(|| not_found("Barbeiro"))?;
    let service = barber
        .service(request.service_id)
        .cloned()
        .ok_or_else(|| not_found("Serviço"))?;
    let time_slot = barber
        .time_slot(request.time_slot_id)
        .cloned()
        .ok_or_else(|| not_found("Horário"))?;

    let booking = BookingResponse {
        id: shop.appointments.len() as Id + 1,
        name: request.name,
        contact: request.contact,
        barber: BarberSnapshot {
            id: barber.id,
            name: barber.name.clone(),
            image_path: None,
        },
        price: service.price,
        service,
        time_slot,
        day: request.day.format("%Y-%m-%d").to_string(),
        stage: BookingStage::Pending,
    };
    shop.appointments.push(booking.clone());
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn list_appointments(State(state): State<Shared>) -> Json<Vec<BookingResponse>> {
    record(&state, "GET /agendas".to_string());
    Json(state.lock().unwrap().appointments.clone())
}

async fn filter_appointments(
    State(state): State<Shared>,
    Json(filter): Json<Value>,
) -> Json<Vec<BookingResponse>> {
    record(&state, format!("POST /agendas/filtro {}", filter));
    let name = filter["nome"].as_str().map(str::to_lowercase);
    let stage = filter["etapa"].as_str().map(str::to_string);
    let shop = state.lock().unwrap();
    Json(
        shop.appointments
            .iter()
            .filter(|a| {
                name.as_ref()
                    .map_or(true, |n| a.name.to_lowercase().contains(n))
            })
            .filter(|a| stage.as_deref().map_or(true, |s| a.stage.wire_name() == s))
            .cloned()
            .collect(),
    )
}

async fn update_stage(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(body): Json<Value>,
) -> Result<StatusCode, (StatusCode, String)> {
    record(&state, format!("PUT /agendas/{} {}", id, body));
    let stage: BookingStage = serde_json::from_value(body["etapa"].clone())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let mut shop = state.lock().unwrap();
    let appointment = shop
        .appointments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| not_found("Agendamento"))?;
    appointment.stage = stage;
    Ok(StatusCode::NO_CONTENT)
}

async fn cancel_appointment(
    State(state): State<Shared>,
    Path(id): Path<Id>,
) -> Result<StatusCode, (StatusCode, String)> {
    record(&state, format!("PUT /agendas/{}/desativar", id));
    let mut shop = state.lock().unwrap();
    let appointment = shop
        .appointments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| not_found("Agendamento"))?;
    appointment.stage = BookingStage::Canceled;
    Ok(StatusCode::NO_CONTENT)
}

fn billed(shop: &ShopState) -> Vec<&BookingResponse> {
    shop.appointments
        .iter()
        .filter(|a| a.stage != BookingStage::Canceled)
        .collect()
}

async fn revenue(State(state): State<Shared>) -> Json<Value> {
    let shop = state.lock().unwrap();
    let total: f64 = billed(&shop).iter().map(|a| a.price).sum();
    Json(json!({ "valor": total }))
}

async fn total_appointments(State(state): State<Shared>) -> Json<Value> {
    let shop = state.lock().unwrap();
    Json(json!({ "total": shop.appointments.len() }))
}

async fn appointments_today(State(state): State<Shared>) -> Json<Value> {
    let today = Local::now().date_naive();
    let shop = state.lock().unwrap();
    let count = shop
        .appointments
        .iter()
        .filter(|a| a.date() == Some(today))
        .count();
    Json(json!({ "total": count }))
}

async fn average_ticket(State(state): State<Shared>) -> Json<Value> {
    let shop = state.lock().unwrap();
    let billed = billed(&shop);
    let average = if billed.is_empty() {
        0.0
    } else {
        billed.iter().map(|a| a.price).sum::<f64>() / billed.len() as f64
    };
    Json(json!({ "valor": average }))
}

async fn cancellation_rate(State(state): State<Shared>) -> Json<Value> {
    let shop = state.lock().unwrap();
    let total = shop.appointments.len();
    let canceled = total - billed(&shop).len();
    let rate = if total == 0 {
        0.0
    } else {
        canceled as f64 * 100.0 / total as f64
    };
    Json(json!({ "taxa": rate }))
}

async fn best_seller(State(state): State<Shared>) -> Result<Json<Value>, (StatusCode, String)> {
    let shop = state.lock().unwrap();
    if shop.broken_best_seller {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Erro interno".to_string()));
    }
    let billed = billed(&shop);
    let mut counts: Vec<(&Service, i64)> = Vec::new();
    for appointment in &billed {
        match counts.iter_mut().find(|(s, _)| s.id == appointment.service.id) {
            Some((_, n)) => *n += 1,
            None => counts.push((&appointment.service, 1)),
        }
    }
    let (service, sales) = counts
        .into_iter()
        .max_by_key(|(_, n)| *n)
        .ok_or_else(|| not_found("Serviço"))?;
    Ok(Json(json!({
        "descricaoDoServico": service.description,
        "valorServico": service.price,
        "porcentagemDeVendas": sales as f64 * 100.0 / billed.len() as f64,
        "quantidadeDeVendas": sales,
    })))
}

async fn daily_summary(State(state): State<Shared>, Path(date): Path<NaiveDate>) -> Json<Value> {
    record(&state, format!("GET /caixas/agendamentos-dia/{}", date));
    let shop = state.lock().unwrap();
    let count = |stage: BookingStage| {
        shop.appointments
            .iter()
            .filter(|a| a.date() == Some(date) && a.stage == stage)
            .count()
    };
    Json(json!({
        "agendasPendentes": count(BookingStage::Pending),
        "agendasConfirmados": count(BookingStage::Confirmed),
        "agendasCancelados": count(BookingStage::Canceled),
        "agendasConcluidos": count(BookingStage::Completed),
    }))
}
