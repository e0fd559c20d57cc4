//! Generate command for the Karabiner configuration file.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::document::{build_document, DocumentOptions};
use crate::hyper::{self, LauncherTable};
use crate::validator::RuleValidator;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate the karabiner.json configuration file
#[derive(Debug, Clone, Args, Default)]
pub struct GenerateArgs {
    /// Output file path (defaults to ./karabiner.json)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Write the generated JSON to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Path to a TOML file of launcher sub-layer overrides
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Name of the generated profile
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,
}

/// Builds the launcher table, merging file overrides over the built-in set.
pub(crate) fn launcher_table(overrides: Option<&Path>) -> CliResult<LauncherTable> {
    let base = hyper::common_table();
    match overrides {
        Some(path) => {
            let custom = hyper::load_overrides(path)
                .map_err(|e| CliError::io(format!("Failed to load overrides: {e:#}")))?;
            Ok(hyper::merge(&base, &custom))
        }
        None => Ok(base),
    }
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().map_err(|e| CliError::io(format!("{e:#}")))?;

        // CLI flags win over the config file
        let overrides = self
            .overrides
            .clone()
            .or_else(|| config.launcher.overrides.clone());
        let table = launcher_table(overrides.as_deref())?;

        let options = DocumentOptions {
            profile_name: self
                .profile
                .clone()
                .unwrap_or_else(|| config.profile.name.clone()),
            show_in_menu_bar: config.profile.show_in_menu_bar,
        };

        let document = build_document(&options, &table);

        // Validate before writing anything
        let report = RuleValidator::new(&document).validate();
        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "Generated rules failed validation:\n{}",
                report.format_message()
            )));
        }

        let json = document
            .to_json()
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if self.stdout {
            print!("{json}");
            return Ok(());
        }

        let out_path = self.out.clone().unwrap_or_else(|| config.output_path());
        fs::write(&out_path, json)
            .map_err(|e| CliError::io(format!("Failed to write {}: {e}", out_path.display())))?;

        let rule_count: usize = document
            .profiles
            .iter()
            .map(|p| p.complex_modifications.rules.len())
            .sum();
        println!("✓ Wrote {} ({rule_count} rule groups)", out_path.display());

        Ok(())
    }
}
