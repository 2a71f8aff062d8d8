//! Tooling & Integration Layer
//!
//! Command-line entry points over the BIF engine and the record store.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
