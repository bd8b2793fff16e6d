//! Application shell: owns the screens, the async runtime and the pending
//! API requests, and carries out the actions screens return.

use crate::api::ApiClient;
use crate::config::Config;
use crate::screens::{
    AppointmentsScreen, BookingScreen, CashScreen, CatalogScreen, MainMenuScreen, RenderContext,
    Screen, ScreenAction, ScreenContext, ServicesScreen,
};
use crate::services::{RequestHandle, RequestService};
use crate::session::Session;
use crate::tui::Tui;
use crate::ui::Screen as ScreenId;
use crate::widgets::ToastManager;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

const TICK: Duration = Duration::from_millis(100);

struct Screens {
    main_menu: MainMenuScreen,
    booking: BookingScreen,
    services: ServicesScreen,
    appointments: AppointmentsScreen,
    catalog: CatalogScreen,
    cash: CashScreen,
}

impl Screens {
    fn new(today: NaiveDate) -> Self {
        Self {
            main_menu: MainMenuScreen::new(),
            booking: BookingScreen::new(today),
            services: ServicesScreen::new(),
            appointments: AppointmentsScreen::new(),
            catalog: CatalogScreen::new(),
            cash: CashScreen::new(today),
        }
    }

    fn get_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match id {
            ScreenId::MainMenu => &mut self.main_menu,
            ScreenId::Booking => &mut self.booking,
            ScreenId::Services => &mut self.services,
            ScreenId::Appointments => &mut self.appointments,
            ScreenId::Catalog => &mut self.catalog,
            ScreenId::Cash => &mut self.cash,
        }
    }
}

pub struct App {
    config: Config,
    session: Session,
    client: ApiClient,
    runtime: Runtime,
    screens: Screens,
    current: ScreenId,
    /// In-flight requests, tagged with the screen that asked for them
    pending: Vec<(ScreenId, RequestHandle)>,
    toasts: ToastManager,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, session: Session) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let client = ApiClient::from_config(&config)?;
        info!("Using API at {}", client.base_url());
        Ok(Self {
            config,
            session,
            client,
            runtime,
            screens: Screens::new(today()),
            current: ScreenId::MainMenu,
            pending: Vec::new(),
            toasts: ToastManager::new(),
            should_quit: false,
        })
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let result = self.event_loop(&mut tui);
        tui.exit()?;
        result
    }

    fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        let action = self.enter_current()?;
        self.apply(action, self.current);

        while !self.should_quit {
            self.poll_requests()?;
            self.toasts.tick();
            self.draw(tui)?;

            if let Some(event) = tui.poll_event(TICK)? {
                self.handle_event(event)?;
            }
        }
        info!("Shutting down with {} request(s) in flight", self.pending.len());
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let ctx = RenderContext::new(&self.config, &self.session);
        let screen = self.screens.get_mut(self.current);
        let toasts = &self.toasts;
        let mut result = Ok(());
        tui.terminal_mut()
            .draw(|frame| {
                let area = frame.area();
                result = screen.render(frame, area, &ctx);
                toasts.render(frame, area);
            })
            .context("Failed to draw frame")?;
        result
    }

    fn enter_current(&mut self) -> Result<ScreenAction> {
        let ctx = ScreenContext::new(&self.config, &self.session, today());
        self.screens.get_mut(self.current).on_enter(&ctx)
    }

    /// Route one terminal event to the active screen.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                self.should_quit = true;
                return Ok(());
            }
            // Esc closes a toast before it reaches the screen
            if key.code == KeyCode::Esc && self.toasts.dismiss() {
                return Ok(());
            }
        }

        let ctx = ScreenContext::new(&self.config, &self.session, today());
        let action = self.screens.get_mut(self.current).handle_event(event, &ctx)?;
        self.apply(action, self.current);
        Ok(())
    }

    /// Hand finished requests back to the screens that issued them.
    pub fn poll_requests(&mut self) -> Result<()> {
        let mut index = 0;
        while index < self.pending.len() {
            let Some(outcome) = self.pending[index].1.try_recv() else {
                index += 1;
                continue;
            };
            let (origin, handle) = self.pending.swap_remove(index);
            let response = match outcome {
                Ok(response) => {
                    debug!("Request '{}' finished for {:?}", handle.name(), origin);
                    response
                }
                // The screen still has to hear about it, or it waits forever
                Err(e) => {
                    error!("{:#}", e);
                    handle.into_failure(&e)
                }
            };
            let ctx = ScreenContext::new(&self.config, &self.session, today());
            let action = self.screens.get_mut(origin).on_response(response, &ctx)?;
            self.apply(action, origin);
        }
        Ok(())
    }

    /// Carry out `action` on behalf of `origin`.
    pub fn apply(&mut self, action: ScreenAction, origin: ScreenId) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(target) => self.navigate(target),
            ScreenAction::Request(request) => {
                let handle = RequestService::start(&self.runtime, &self.client, request);
                self.pending.push((origin, handle));
            }
            ScreenAction::Toast(toast) => self.toasts.push(toast),
            ScreenAction::Batch(actions) => {
                for action in actions {
                    self.apply(action, origin);
                }
            }
            ScreenAction::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, target: ScreenId) {
        if target == self.current {
            return;
        }
        info!("Screen: {:?} -> {:?}", self.current, target);
        let ctx = ScreenContext::new(&self.config, &self.session, today());
        if let Err(e) = self.screens.get_mut(self.current).on_exit(&ctx) {
            error!("Leaving {:?} failed: {:#}", self.current, e);
        }
        self.current = target;
        match self.enter_current() {
            Ok(action) => self.apply(action, target),
            Err(e) => {
                error!("Entering {:?} failed: {:#}", target, e);
                self.toasts.error(format!("{:#}", e));
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
