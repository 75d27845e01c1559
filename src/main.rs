pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod search;
pub mod ui;

use api::TracktraceClient;
use app::App;
use clap::Parser;
use cli::{Cli, CliCommand};
use config::{AppConfig, load_config};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize tracing (logs to stderr if RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config();
    let client = cli::build_client(&mut config, cli.backend)?;
    tracing::info!(backend = client.base_url(), "client initialized");

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None | Some(CliCommand::Tui) => run_tui(config, client).await,
        // All other subcommands → non-interactive output.
        Some(cmd) => cli::run_command(cmd, client).await,
    }
}

/// Launch the interactive TUI.
async fn run_tui(config: AppConfig, client: TracktraceClient) -> color_eyre::Result<()> {
    let terminal = ratatui::init();
    // Pasted links arrive as one event instead of a burst of key presses.
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableBracketedPaste) {
        tracing::warn!("bracketed paste unavailable: {e}");
    }
    let result = App::new(config, client).run(terminal).await;
    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}
