//! Services that sit between the UI and the API.
//!
//! Screens never await anything. They hand an [`ApiRequest`] to the app,
//! which starts it here and polls the returned handle each tick.
//!
//! [`ApiRequest`]: crate::api::ApiRequest

pub mod request_service;

pub use request_service::{RequestHandle, RequestService};
