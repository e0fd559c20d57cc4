//! Construction-time validation of the generated rules.
//!
//! The host never reports a typo'd variable name or key code; it just
//! creates a new, unintended variable or a rule that can never fire.
//! This pass runs before anything is written, so those defects fail the
//! build instead of surfacing as wrong runtime behavior discoverable only
//! by manual testing.

use std::fmt::Write as _;

use crate::keycodes;
use crate::models::{Condition, KarabinerConfig, Manipulator, ToEvent};
use crate::vim::modes::NATIVE_VIM_BUNDLES;
use crate::vim::vars;

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Defects that must block the write
    pub errors: Vec<String>,
    /// Suspicious but non-blocking findings
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no blocking defects were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Formats the report for terminal output.
    pub fn format_message(&self) -> String {
        let mut message = String::new();
        for error in &self.errors {
            let _ = writeln!(message, "error: {error}");
        }
        for warning in &self.warnings {
            let _ = writeln!(message, "warning: {warning}");
        }
        message
    }
}

/// Validates a fully assembled document.
pub struct RuleValidator<'a> {
    config: &'a KarabinerConfig,
}

impl<'a> RuleValidator<'a> {
    /// Creates a validator over `config`.
    pub fn new(config: &'a KarabinerConfig) -> Self {
        Self { config }
    }

    /// Runs every check and collects the findings.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for profile in &self.config.profiles {
            for group in &profile.complex_modifications.rules {
                if group.manipulators.is_empty() {
                    report
                        .warnings
                        .push(format!("group \"{}\" has no rules", group.description));
                }
                for (index, manipulator) in group.manipulators.iter().enumerate() {
                    let location = format!("{} #{}", group.description, index);
                    check_variable_names(manipulator, &location, &mut report);
                    check_key_codes(manipulator, &location, &mut report);
                    check_mode_guards(manipulator, &location, &mut report);
                    if group.description.starts_with("Vim") {
                        check_native_vim_guard(manipulator, &location, &mut report);
                    }
                }
            }
        }

        report
    }
}

fn effect_lists(manipulator: &Manipulator) -> Vec<&Vec<ToEvent>> {
    let mut lists = vec![&manipulator.to];
    if let Some(to) = &manipulator.to_if_alone {
        lists.push(to);
    }
    if let Some(to) = &manipulator.to_after_key_up {
        lists.push(to);
    }
    if let Some(delayed) = &manipulator.to_delayed_action {
        lists.push(&delayed.to_if_invoked);
        lists.push(&delayed.to_if_canceled);
    }
    lists
}

/// Every variable a guard reads or an effect writes must be registered.
fn check_variable_names(manipulator: &Manipulator, location: &str, report: &mut ValidationReport) {
    for condition in &manipulator.conditions {
        if let Some(name) = condition.variable_name() {
            if !vars::is_registered(name) {
                report
                    .errors
                    .push(format!("{location}: guard reads unregistered variable \"{name}\""));
            }
        }
    }
    for list in effect_lists(manipulator) {
        for event in list {
            if let Some(name) = event.variable_name() {
                if !vars::is_registered(name) {
                    report.errors.push(format!(
                        "{location}: effect writes unregistered variable \"{name}\""
                    ));
                }
            }
        }
    }
}

/// Every matched and emitted key code must be in the known vocabulary.
fn check_key_codes(manipulator: &Manipulator, location: &str, report: &mut ValidationReport) {
    if let Some(key_code) = manipulator.from.key_code() {
        if !keycodes::is_known(key_code) {
            report
                .errors
                .push(format!("{location}: unknown trigger key code \"{key_code}\""));
        }
    }
    for list in effect_lists(manipulator) {
        for event in list {
            if let Some(key_code) = event.key_code() {
                if !keycodes::is_known(key_code) {
                    report
                        .errors
                        .push(format!("{location}: unknown emitted key code \"{key_code}\""));
                }
            }
        }
    }
}

/// No rule may require two exclusive mode variables to be set at once;
/// such a rule can never fire if the exclusion convention holds, and
/// signals miswired rule construction.
fn check_mode_guards(manipulator: &Manipulator, location: &str, report: &mut ValidationReport) {
    let required_modes: Vec<&str> = manipulator
        .conditions
        .iter()
        .filter_map(|condition| match condition {
            Condition::VariableIf { name, value: 1 } if vars::MODES.contains(&name.as_str()) => {
                Some(name.as_str())
            }
            _ => None,
        })
        .collect();
    if required_modes.len() > 1 {
        report.errors.push(format!(
            "{location}: contradictory mode guards ({})",
            required_modes.join(", ")
        ));
    }
}

/// Every Vim rule must be scoped by frontmost-application identity: the
/// stand-down guard for ordinary rules, or the inverse guard on the
/// force-exit rules themselves.
fn check_native_vim_guard(manipulator: &Manipulator, location: &str, report: &mut ValidationReport) {
    let scoped = manipulator.conditions.iter().any(|condition| {
        matches!(
            condition,
            Condition::FrontmostApplicationUnless { bundle_identifiers }
            | Condition::FrontmostApplicationIf { bundle_identifiers }
                if bundle_identifiers
                    .iter()
                    .any(|id| NATIVE_VIM_BUNDLES.contains(&id.as_str()))
        )
    });
    if !scoped {
        report.errors.push(format!(
            "{location}: missing native-Vim frontmost-application guard"
        ));
    }
}
