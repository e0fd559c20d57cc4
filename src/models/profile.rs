//! Top-level document structure: rule groups, profile, and global settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::manipulator::Manipulator;

/// A named, ordered list of manipulators.
///
/// Groups are concatenated in a fixed order to form the final document;
/// ordering is significant because the host takes the first matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    /// Group description shown in the host UI
    pub description: String,
    /// The group's rules, in evaluation order
    pub manipulators: Vec<Manipulator>,
}

impl RuleGroup {
    /// Creates a rule group from a description and its rules.
    pub fn new(description: impl Into<String>, manipulators: Vec<Manipulator>) -> Self {
        Self {
            description: description.into(),
            manipulators,
        }
    }
}

/// The `complex_modifications` section of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexModifications {
    /// All rule groups, in evaluation order
    pub rules: Vec<RuleGroup>,
}

/// One Karabiner profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name shown in the host UI
    pub name: String,
    /// The profile's complex modifications
    pub complex_modifications: ComplexModifications,
}

/// Global host settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Whether the host shows its menu bar icon
    pub show_in_menu_bar: bool,
}

/// The whole emitted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarabinerConfig {
    /// Global host settings
    pub global: GlobalSettings,
    /// Profiles; this generator always emits exactly one
    pub profiles: Vec<Profile>,
}

impl KarabinerConfig {
    /// Assembles a single-profile document from an ordered rule list.
    pub fn new(profile_name: impl Into<String>, show_in_menu_bar: bool, rules: Vec<RuleGroup>) -> Self {
        Self {
            global: GlobalSettings { show_in_menu_bar },
            profiles: vec![Profile {
                name: profile_name.into(),
                complex_modifications: ComplexModifications { rules },
            }],
        }
    }

    /// Serializes the document as pretty-printed JSON with a trailing
    /// newline. Output is byte-deterministic for identical inputs.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{FromEvent, ToEvent};

    fn sample_config() -> KarabinerConfig {
        let manipulator =
            Manipulator::basic(FromEvent::key("h")).with_to(vec![ToEvent::key("left_arrow")]);
        KarabinerConfig::new(
            "Default",
            false,
            vec![RuleGroup::new("Sample", vec![manipulator])],
        )
    }

    #[test]
    fn test_document_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_config().to_json().unwrap()).unwrap();
        assert_eq!(json["global"]["show_in_menu_bar"], serde_json::json!(false));
        assert_eq!(json["profiles"][0]["name"], serde_json::json!("Default"));
        assert_eq!(
            json["profiles"][0]["complex_modifications"]["rules"][0]["description"],
            serde_json::json!("Sample")
        );
    }

    #[test]
    fn test_to_json_is_deterministic() {
        let config = sample_config();
        assert_eq!(config.to_json().unwrap(), config.to_json().unwrap());
    }

    #[test]
    fn test_to_json_ends_with_newline() {
        assert!(sample_config().to_json().unwrap().ends_with('\n'));
    }
}
