#![deny(clippy::all, clippy::pedantic)]
//! # Starlane Runtime
//!
//! Headless driver for the physics core. It parses the command line
//! ([`cli`]), builds a demo sector ([`scenario`]) and runs the tick loop
//! with structured logging ([`app`]). The `starlane` binary is a thin
//! wrapper over [`app::run`].

pub mod app;
pub mod cli;
pub mod scenario;

pub use app::{run, run_sector, RunSummary, TracingSink};
pub use cli::Cli;
pub use scenario::Sector;
