//! Screen controllers for the application.
//!
//! Every screen implements [`Screen`]: it owns its state, renders itself and
//! turns key events and API responses into [`ScreenAction`]s. The app routes
//! events to the active screen and carries out the actions it returns.
//!
//! ```text
//! ┌──────────────────────────── App ────────────────────────────┐
//! │  event ──► active screen.handle_event ──► ScreenAction      │
//! │                                              │              │
//! │  ApiResponse ◄── request worker ◄── Request ─┘              │
//! │       │                                                     │
//! │       └──► issuing screen.on_response ──► ScreenAction      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod appointments;
pub mod booking;
pub mod cash;
pub mod catalog;
pub mod catalog_form;
pub mod main_menu;
pub mod screen_trait;
pub mod services;

pub use appointments::AppointmentsScreen;
pub use booking::BookingScreen;
pub use cash::CashScreen;
pub use catalog::CatalogScreen;
pub use main_menu::MainMenuScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use services::ServicesScreen;
