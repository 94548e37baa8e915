//! Voight - pair an interviewer and a suspect into a stateful interview
//! session and find out whether the suspect is human.
//!
//! Architecture:
//! - The engine owns a concurrency-safe registry of interviews, allocates
//!   strictly increasing ids, seats connections in arrival order, draws game
//!   content without replacement, and computes the final outcome.
//! - The server is a thin HTTP/WebSocket controller over the engine.
//! - The CLI runs the server or talks to a running one over HTTP.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod server;
pub mod sink;
