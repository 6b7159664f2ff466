//! `atlas`: terminal directory of the countries of the world.
//!
//! Built on [ratatui](https://ratatui.rs). On start the app fetches the full
//! country collection through `atlas-core`'s [`FetchPipeline`], showing a
//! spinner until it arrives and an error view with "Try Again" if it fails.
//! Once loaded, the directory screen offers text search, a region filter, a
//! detail panel and navigation between neighbouring countries.
//!
//! Logs are written to a file (default `/tmp/atlas.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config loading, tracing setup, panic
//! hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod fetch_bridge;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use atlas_core::FetchPipeline;

use crate::app::App;

/// Browse the countries of the world from the terminal.
#[derive(Parser, Debug)]
#[command(name = "atlas", version, about)]
struct Cli {
    /// Endpoint returning the full country collection as JSON
    #[arg(short = 'e', long, env = "ATLAS_ENDPOINT")]
    endpoint: Option<String>,

    /// Country selected after a successful load (exact common name)
    #[arg(short = 'd', long)]
    default_country: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/atlas.log)
    #[arg(long, default_value = "/tmp/atlas.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Crate-level filter for `-v` count: warn, info, debug, then trace.
fn default_filter(verbose: u8) -> String {
    let level = ["warn", "info", "debug", "trace"][usize::from(verbose.min(3))];
    ["atlas", "atlas_core", "atlas_api"]
        .map(|target| format!("{target}={level}"))
        .join(",")
}

/// File-based tracing only; anything on stdout/stderr would corrupt the
/// TUI. The returned guard must live as long as the app so logs flush.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = log_file
        .file_name()
        .unwrap_or(OsStr::new("atlas.log"));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Priority: CLI flags > environment > config file > built-in defaults.
fn build_pipeline(cli: &Cli) -> Result<FetchPipeline> {
    let mut config = match &cli.config {
        Some(path) => atlas_config::load_config_from(path)?,
        None => atlas_config::load_config()?,
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(name) = &cli.default_country {
        config.default_country.clone_from(name);
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }

    let directory = config.to_directory_config()?;
    info!(
        endpoint = %directory.endpoint,
        default_country = %directory.default_country,
        timeout_secs = directory.timeout.as_secs(),
        attempts = directory.retry.max_attempts,
        "configuration loaded"
    );
    Ok(FetchPipeline::new(&directory)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli.log_file, cli.verbose);
    info!(version = env!("CARGO_PKG_VERSION"), "starting atlas");

    let pipeline = build_pipeline(&cli)?;
    let mut app = App::new(Arc::new(pipeline));
    app.run().await?;

    Ok(())
}
