//! Barbershop - book appointments and run the shop from the terminal
//!
//! The library holds the booking wizard, the typed API client and the TUI
//! screens; the binary wires them to a terminal or to CLI subcommands.

// Core modules
pub mod api;
pub mod app;
pub mod booking;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod remote;
pub mod screens;
pub mod services;
pub mod session;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use api::{ApiClient, ApiRequest, ApiResponse};
pub use booking::{BookingWizard, WizardEffect, WizardStep};
pub use config::Config;
pub use session::Session;

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
