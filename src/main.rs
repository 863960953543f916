#![forbid(unsafe_code)]

mod constants;
mod overlay;
mod ruler;
mod settings;
mod splash;
mod store;

use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

/// Screen overlay with ruler ticks, crosshair guides, and an optional grid
#[derive(Parser, Debug)]
#[command(name = "griddy", version, about)]
struct Cli {
    /// Run the decorative splash window instead of the overlay
    #[arg(long)]
    splash: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    if cli.splash {
        info!("Starting in splash mode");
        splash::run_splash()?;
    } else {
        info!("Starting overlay");
        overlay::run_overlay()?;
    }

    Ok(())
}
