//! sqlpane - A keyboard-driven database browser for the terminal
//!
//! This is the main entry point for the sqlpane application.
//! The actual logic is in the library modules for better testability.

use anyhow::{Context, Result};
use clap::Parser;
use sqlpane::app::App;
use sqlpane::config::Settings;
use sqlpane::config::settings::{load_settings, load_settings_from};
use sqlpane::logging::{self, LoggingConfig};
use sqlpane::runtime::{EventLoop, init_terminal, restore_terminal};
use std::path::PathBuf;

/// Browse and query databases from the terminal
#[derive(Debug, Parser)]
#[command(name = "sqlpane", version, about)]
struct Args {
    /// Connect on startup, e.g. sqlite:///path/to/file.db
    #[arg(long)]
    url: Option<String>,

    /// Settings file (default: ~/.sqlpane/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "sqlpane=trace". RUST_LOG wins over this.
    #[arg(long)]
    log_level: Option<String>,
}

fn settings_for(args: &Args) -> sqlpane::Result<Settings> {
    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = settings_for(&args).context("failed to load settings")?;

    let filter = args
        .log_level
        .clone()
        .unwrap_or_else(|| settings.log_level.clone());
    let _log_guard = logging::init(&LoggingConfig::new(settings.log_dir(), filter))
        .context("failed to initialize logging")?;

    let mut app = App::new(&settings);
    let startup = match args.url {
        Some(url) => app.connect(url),
        None => Vec::new(),
    };

    let event_loop = EventLoop::new(app, settings.command_timeout());
    event_loop.submit(startup);

    let mut terminal =
        init_terminal().context("failed to initialize terminal; are you running in a real TTY?")?;
    let result = event_loop.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "sqlpane exited with an error");
    }
    result
}
