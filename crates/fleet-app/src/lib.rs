//! # Fleet Application
//!
//! Wires the SQLite storage backend to the use case handlers and exposes
//! them as the `fleet` command-line tool.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::Command;
pub use config::FleetConfig;
pub use output::Report;
