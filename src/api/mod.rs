//! Barbershop REST API: typed client, wire models and the request envelopes
//! the UI uses to talk to the async runtime.

pub mod client;
pub mod models;
pub mod request;

pub use client::{ApiClient, Resource, StatusError};
pub use request::{ApiRequest, ApiResponse, Catalog};
