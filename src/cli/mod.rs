//! Command-line interface.
//!
//! Without a subcommand the binary starts the TUI. Subcommands cover the
//! same ground for scripts: browsing barbers and free slots, booking through
//! the same wizard the TUI uses, and the admin operations on appointments.

mod admin;
mod book;
mod common;
pub mod completions;
mod profile;

pub use common::*;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use crate::api::models::{BookingStage, Id};

/// Book barbershop appointments and run the shop from your terminal
#[derive(Parser, Debug)]
#[command(
    name = "barbershop",
    version,
    about = "Book barbershop appointments and run the shop from your terminal",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List barbers with their services and time slots
    Barbers {
        /// Include deactivated barbers
        #[arg(short, long)]
        all: bool,
    },
    /// List the services on offer with their prices
    Services,
    /// Show a barber's free time slots on a day
    Slots {
        /// Barber id
        #[arg(short, long)]
        barber: Id,
        /// Day to check (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Book an appointment
    Book {
        /// Client name (defaults to the saved profile)
        #[arg(short, long)]
        name: Option<String>,
        /// Contact phone (defaults to the saved profile)
        #[arg(short, long)]
        contact: Option<String>,
        /// Barber id or name
        #[arg(short, long)]
        barber: String,
        /// Service id or description
        #[arg(short, long)]
        service: String,
        /// Day of the appointment (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Time slot id or start time (HH:MM)
        #[arg(short = 't', long)]
        slot: String,
        /// Save name and contact as the profile for next time
        #[arg(long)]
        remember: bool,
    },
    /// List appointments, optionally filtered
    Appointments {
        /// Only this stage (pendente, confirmado, cancelado, concluido)
        #[arg(long)]
        stage: Option<BookingStage>,
        /// Client name contains
        #[arg(long)]
        name: Option<String>,
    },
    /// Move an appointment to another stage
    Stage {
        /// Appointment id
        id: Id,
        /// New stage (pendente, confirmado, cancelado, concluido)
        stage: BookingStage,
    },
    /// Cancel an appointment
    Cancel {
        /// Appointment id
        id: Id,
    },
    /// Cash figures and a day's breakdown by stage
    Cash {
        /// Day for the breakdown (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show or change the saved customer profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Generate shell completions
    Completions {
        /// Target shell (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
    /// Shows logs location and how to view them
    Logs,
    /// Configuration file location
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the saved profile
    Show,
    /// Save a profile used to prefill bookings
    Set {
        /// Client name
        #[arg(short, long)]
        name: String,
        /// Contact phone
        #[arg(short, long)]
        contact: String,
    },
    /// Forget the saved profile
    Clear,
}

impl Cli {
    /// Execute the CLI command. Returns `false` when the TUI should start.
    pub fn execute(self) -> Result<bool> {
        let Some(command) = self.command else {
            return Ok(false);
        };
        match command {
            Commands::Barbers { all } => admin::cmd_barbers(all)?,
            Commands::Services => book::cmd_services()?,
            Commands::Slots { barber, date } => book::cmd_slots(barber, date)?,
            Commands::Book {
                name,
                contact,
                barber,
                service,
                date,
                slot,
                remember,
            } => book::cmd_book(book::BookArgs {
                name,
                contact,
                barber,
                service,
                date,
                slot,
                remember,
            })?,
            Commands::Appointments { stage, name } => admin::cmd_appointments(stage, name)?,
            Commands::Stage { id, stage } => admin::cmd_stage(id, stage)?,
            Commands::Cancel { id } => admin::cmd_cancel(id)?,
            Commands::Cash { date } => admin::cmd_cash(date)?,
            Commands::Profile { command } => profile::cmd_profile(command)?,
            Commands::Completions { shell } => completions::generate(shell)?,
            Commands::Logs => {
                let log_file = crate::utils::get_log_dir().join("barbershop.log");
                println!("{}", log_file.display());
                println!("View logs in real-time: tail -f {}", log_file.display());
            }
            Commands::Config => println!("{}", crate::utils::get_config_path().display()),
        }
        Ok(true)
    }
}
