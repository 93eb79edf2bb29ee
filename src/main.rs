//! streamcheck - end-to-end checks for a video streaming site
//!
//! Main entry point for the streamcheck CLI.

mod cli;
mod cmd_browser;
mod cmd_report;

use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use streamcheck_config::{Config, ConfigLoader};

use cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to the configured logs directory with daily rotation.
fn init_tracing(log_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("streamcheck")
        .filename_suffix("log")
        .max_log_files(14)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the background writer.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
        )
        .init();

    Ok(())
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(path)?;
    if let Some(profile) = config.browser.profile_dir.take() {
        config.browser.profile_dir = Some(ConfigLoader::expand_path(&profile));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    init_tracing(&config.artifacts.logs_dir)?;
    info!("streamcheck v{} (config: {})", env!("CARGO_PKG_VERSION"), cli.config.display());

    match cli.command {
        Commands::Smoke { query, seek } => cmd_browser::run_smoke(&config, &query, seek).await,
        Commands::SkipAds { url } => cmd_browser::run_skip_ads(&config, url.as_deref()).await,
        Commands::Report { json_dir, output } => {
            cmd_report::run_report(&config, json_dir, output)
        }
        Commands::Validate => cmd_report::run_validate(&config),
    }
}
