//! Voight - pair an interviewer and a suspect into interview sessions.
//!
//! The server owns every interview: id allocation, seating, content draws,
//! and outcomes all go through it so concurrent participants can never race
//! each other. The CLI is a thin client that runs the server or talks to it
//! via HTTP.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use voight::cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voight=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    execute(cli).await
}
