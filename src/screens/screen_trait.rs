//! Screen trait and associated types.
//!
//! Screens own their state, never perform I/O themselves and talk to the app
//! only through [`ScreenAction`]s: navigation, toasts and API requests. When a
//! request completes the app hands the response back to the screen that
//! issued it through [`Screen::on_response`].

use crate::api::{ApiRequest, ApiResponse};
use crate::config::Config;
use crate::session::Session;
use crate::ui::Screen as ScreenId;
use crate::widgets::Toast;
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    pub session: &'a Session,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, session: &'a Session) -> Self {
        Self { config, session }
    }
}

/// Read-only resources for event handling.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub session: &'a Session,
    /// Local date, used as the earliest bookable day
    pub today: NaiveDate,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, session: &'a Session, today: NaiveDate) -> Self {
        Self {
            config,
            session,
            today,
        }
    }
}

#[derive(Debug, Default)]
pub enum ScreenAction {
    #[default]
    None,
    Navigate(ScreenId),
    /// Run an API call; the response comes back through `on_response`.
    Request(ApiRequest),
    Toast(Toast),
    /// Several actions, applied in order.
    Batch(Vec<ScreenAction>),
    Quit,
}

impl ScreenAction {
    /// Combine two actions, dropping `None`s.
    pub fn and(self, other: ScreenAction) -> ScreenAction {
        match (self, other) {
            (ScreenAction::None, b) => b,
            (a, ScreenAction::None) => a,
            (ScreenAction::Batch(mut a), b) => {
                a.push(b);
                ScreenAction::Batch(a)
            }
            (a, b) => ScreenAction::Batch(vec![a, b]),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ScreenAction::None)
    }

    pub fn error(message: impl Into<String>) -> Self {
        ScreenAction::Toast(Toast::error(message))
    }

    pub fn success(message: impl Into<String>) -> Self {
        ScreenAction::Toast(Toast::success(message))
    }
}

impl From<Option<ApiRequest>> for ScreenAction {
    fn from(request: Option<ApiRequest>) -> Self {
        request.map_or(ScreenAction::None, ScreenAction::Request)
    }
}

pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// A request this screen issued has finished.
    fn on_response(&mut self, _response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// When true the app stops treating keys such as `q` as shortcuts.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called on every navigation to this screen; usually kicks off a load.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
