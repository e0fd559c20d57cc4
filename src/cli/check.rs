//! Check command: build and validate the rules without writing them.

use crate::cli::common::{CliError, CliResult};
use crate::cli::generate::launcher_table;
use crate::config::Config;
use crate::document::{build_document, DocumentOptions};
use crate::validator::RuleValidator;
use clap::Args;
use std::path::PathBuf;

/// Validate the generated rules without writing a file
#[derive(Debug, Clone, Args, Default)]
pub struct CheckArgs {
    /// Path to a TOML file of launcher sub-layer overrides
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().map_err(|e| CliError::io(format!("{e:#}")))?;

        let overrides = self
            .overrides
            .clone()
            .or_else(|| config.launcher.overrides.clone());
        let table = launcher_table(overrides.as_deref())?;

        let options = DocumentOptions {
            profile_name: config.profile.name.clone(),
            show_in_menu_bar: config.profile.show_in_menu_bar,
        };
        let document = build_document(&options, &table);

        let report = RuleValidator::new(&document).validate();

        if !report.warnings.is_empty() {
            print!("{}", report.format_message());
        }

        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "✗ Validation failed:\n{}",
                report.format_message()
            )));
        }

        let rule_count: usize = document
            .profiles
            .iter()
            .map(|p| p.complex_modifications.rules.len())
            .sum();
        println!("✓ Validation passed ({rule_count} rule groups)");

        Ok(())
    }
}
