//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default port the server listens on.
pub const DEFAULT_PORT: u16 = 58412;

/// Voight - pair an interviewer and a suspect into interview sessions
#[derive(Parser, Debug)]
#[command(name = "voight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interview server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Path to a game catalog JSON file (defaults to the built-in catalog)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a game catalog and list its packets
    Packets {
        /// Path to a game catalog JSON file (defaults to the built-in catalog)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List interviews on a running server
    Interviews {
        /// Port the server listens on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}
