//! CLI command execution.
//!
//! `serve` runs the controller in-process; the other commands are thin
//! clients that inspect a catalog locally or talk to a running server over
//! HTTP.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::GameConfig;
use crate::models::InterviewSnapshot;
use crate::server;

use super::args::{Cli, Commands};

/// Execute the parsed CLI command.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { port, config } => {
            let config = load_catalog(config.as_deref())?;
            server::start_server(config, port).await
        }
        Commands::Packets { config } => {
            let config = load_catalog(config.as_deref())?;
            print_packets(&config);
            Ok(())
        }
        Commands::Interviews { port } => {
            let interviews = get_interviews_from_server(port).await?;
            print_interviews(&interviews);
            Ok(())
        }
    }
}

/// Load the catalog from a file, or fall back to the built-in one.
fn load_catalog(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => GameConfig::builtin().context("Built-in catalog is invalid"),
    }
}

fn print_packets(config: &GameConfig) {
    println!("{} packet(s):", config.packets.len());
    for (index, packet) in config.packets.iter().enumerate() {
        println!(
            "  [{index}] {} - {} roles, {} primary / {} secondary questions",
            packet.name,
            packet.roles.len(),
            packet.primary_questions.len(),
            packet.secondary_questions.len()
        );
    }
    println!(
        "global pools: {} penalties, {} suspect notes",
        config.penalties.len(),
        config.suspect_notes.len()
    );
}

/// Get interviews from the server.
async fn get_interviews_from_server(port: u16) -> Result<Vec<InterviewSnapshot>> {
    let url = format!("http://127.0.0.1:{port}/api/interviews");

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .context("Failed to reach the voight server")?;

    if !resp.status().is_success() {
        bail!("Server returned {}", resp.status());
    }

    let interviews: Vec<InterviewSnapshot> =
        resp.json().await.context("Failed to parse interviews")?;
    Ok(interviews)
}

fn print_interviews(interviews: &[InterviewSnapshot]) {
    if interviews.is_empty() {
        println!("No interviews");
        return;
    }

    for interview in interviews {
        let seats = match (interview.interviewer_present, interview.suspect_present) {
            (true, true) => "2/2",
            (true, false) | (false, true) => "1/2",
            (false, false) => "0/2",
        };

        let outcome = interview
            .outcome
            .map_or_else(|| "-".to_string(), |o| o.to_string());

        println!(
            "  #{} {} seats {} packet {} outcome {}",
            interview.id,
            interview.status,
            seats,
            interview.packet.as_deref().unwrap_or("-"),
            outcome
        );
    }
}
