//! CLI command handlers.
//!
//! This module provides headless, scriptable access to the generator for
//! automation and CI use.

pub mod check;
pub mod common;
pub mod generate;

// Re-export types used by main.rs and tests
pub use check::CheckArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
