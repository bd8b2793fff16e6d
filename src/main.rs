use anyhow::{Context, Result};
use barbershop::app::App;
use barbershop::cli::Cli;
use barbershop::config::Config;
use barbershop::session::Session;
use barbershop::styles::{init_theme, ThemeType};
use barbershop::{tui, utils};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let no_colors = cli.no_colors;

    // Set up logging directory
    let log_dir = utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    let log_file = log_dir.join("barbershop.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(&log_dir, "barbershop.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if cli.execute()? {
        return Ok(());
    }

    let config = Config::load_or_create(&utils::get_config_path())
        .context("Failed to load configuration")?;
    let session = Session::load(&utils::get_session_path()).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable profile: {:#}", e);
        Session::anonymous()
    });
    init_theme(if no_colors {
        ThemeType::NoColor
    } else {
        config.theme_type()
    });

    // Shown briefly before the alternate screen takes over
    eprintln!("Logs are being written to: {:?}", log_file);
    eprintln!("View logs in real-time: tail -f {:?}", log_file);

    tui::install_panic_hook();
    let mut app = App::new(config, session)?;
    app.run()
}
