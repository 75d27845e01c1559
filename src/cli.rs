use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::api::TracktraceClient;
use crate::api::types::ProcessResult;
use crate::config::AppConfig;
use crate::search::{SearchController, SearchState};
use crate::ui::results::track_rows;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "tracktrace",
    about = "Extract tracklists from YouTube and SoundCloud links"
)]
pub struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// Extract the tracklist of a media link (JSONL)
    Process {
        /// YouTube or SoundCloud link
        url: String,
    },
    /// Check that the backend is reachable (JSON)
    Health,
}

// ---------------------------------------------------------------------------
// Client construction (shared with main.rs TUI path)
// ---------------------------------------------------------------------------

/// Build the backend client from config, applying a `--backend` override.
pub fn build_client(
    config: &mut AppConfig,
    backend: Option<String>,
) -> eyre::Result<TracktraceClient> {
    if let Some(backend) = backend {
        config.backend_url = backend;
    }
    let client = TracktraceClient::new(&config.backend_url, config.request_timeout())?;
    Ok(client)
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Write a header line followed by one JSON line per track.
fn write_tracklist(out: &mut impl Write, result: &ProcessResult) -> eyre::Result<()> {
    let header = serde_json::json!({ "title": result.title, "type": result.kind });
    writeln!(out, "{}", serde_json::to_string(&header)?)?;

    for row in track_rows(result) {
        let line = serde_json::json!({
            "index": row.position,
            "time": row.time,
            "title": row.title,
        });
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(cmd: CliCommand, client: TracktraceClient) -> eyre::Result<()> {
    match cmd {
        CliCommand::Tui => unreachable!("tui is handled in main"),

        CliCommand::Process { url } => {
            let mut search = SearchController::new();
            if let Some(ticket) = search.submit(&url) {
                let outcome = client
                    .process(&ticket.url)
                    .await
                    .map_err(|e| Arc::new(e.to_string()));
                search.complete(ticket.seq, outcome);
            }
            report(search.state(), &mut std::io::stdout().lock())?;
        }

        CliCommand::Health => {
            let health = client.health().await.map_err(|e| eyre!("{e}"))?;
            println!("{}", serde_json::to_string(&health)?);
        }
    }

    Ok(())
}

/// Print whatever the finished search holds; errors become the exit status.
fn report(state: &SearchState, out: &mut impl Write) -> eyre::Result<()> {
    if let Some(result) = state.result() {
        write_tracklist(out, result)?;
    }
    match state.error() {
        Some(e) => Err(eyre!("{e}")),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Track;
    use crate::search::SearchError;

    fn mix() -> ProcessResult {
        ProcessResult {
            title: "Mix 1".into(),
            kind: "youtube".into(),
            tracks: Some(vec![
                Track {
                    time: "00:00".into(),
                    title: "Intro".into(),
                },
                Track {
                    time: "03:12".into(),
                    title: "Track 2".into(),
                },
            ]),
        }
    }

    fn output_lines(out: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn report_prints_header_then_tracks() {
        let state = SearchState::Success {
            result: mix(),
            warning: None,
        };
        let mut out = Vec::new();
        report(&state, &mut out).unwrap();

        let lines = output_lines(out);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["title"], "Mix 1");
        assert_eq!(lines[0]["type"], "youtube");
        assert_eq!(lines[1]["index"], 1);
        assert_eq!(lines[1]["title"], "Intro");
        assert_eq!(lines[2]["time"], "03:12");
    }

    #[test]
    fn report_prints_partial_data_and_fails() {
        let state = SearchState::Success {
            result: ProcessResult {
                title: "Set".into(),
                kind: "soundcloud".into(),
                tracks: Some(vec![]),
            },
            warning: Some(SearchError::DataShape),
        };
        let mut out = Vec::new();
        let err = report(&state, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "No tracks found for the provided URL.");
        assert_eq!(output_lines(out).len(), 1);
    }

    #[test]
    fn report_validation_error_prints_nothing() {
        let mut out = Vec::new();
        let err = report(&SearchState::Error(SearchError::Validation), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Please paste a YouTube or SoundCloud link.");
        assert!(out.is_empty());
    }

    #[test]
    fn backend_flag_overrides_config() {
        let mut config = AppConfig::default();
        let client = build_client(&mut config, Some("http://127.0.0.1:9000/".into())).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.backend_url, "http://127.0.0.1:9000/");
    }

    #[test]
    fn cli_parses_process_with_global_backend() {
        let cli = Cli::parse_from([
            "tracktrace",
            "process",
            "https://youtu.be/x",
            "--backend",
            "http://h:1",
        ]);
        assert_eq!(cli.backend.as_deref(), Some("http://h:1"));
        assert!(matches!(
            cli.command,
            Some(CliCommand::Process { ref url }) if url == "https://youtu.be/x"
        ));
    }
}
