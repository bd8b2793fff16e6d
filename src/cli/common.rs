//! Shared plumbing for CLI commands: loading config, session and an API
//! client, plus the output helpers every command prints with.

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::Session;
use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Everything a command needs to talk to the backend.
pub struct CliContext {
    pub config: Config,
    pub session: Session,
    pub session_path: PathBuf,
    pub client: ApiClient,
    pub runtime: Runtime,
}

impl CliContext {
    pub fn load() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;
        let session_path = crate::utils::get_session_path();
        let session = Session::load(&session_path).context("Failed to load profile")?;
        let client = ApiClient::from_config(&config)?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            config,
            session,
            session_path,
            client,
            runtime,
        })
    }

    /// Block on one API call.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}

/// Left-aligned `label: value` row used by the detail views.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<10} {}", format!("{}:", label), value);
}
