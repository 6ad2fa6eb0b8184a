//! Library exports for hotel-cli.
//!
//! Exposes the CLI structure so the build script and tests can reach it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod utils;

pub use cli::Cli;
