//! Assembly of the final document.
//!
//! Groups are concatenated in a fixed order: the Hyper Key, its
//! sub-layers, then the Vim layer with its lockdown group last. The host
//! takes the first matching rule, so this order is part of the contract.

use crate::hyper;
use crate::hyper::LauncherTable;
use crate::models::{KarabinerConfig, RuleGroup};
use crate::vim;

/// Document-level options.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Profile name
    pub profile_name: String,
    /// Whether the host shows its menu bar icon
    pub show_in_menu_bar: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            profile_name: "Default".to_string(),
            show_in_menu_bar: false,
        }
    }
}

/// Builds the full ordered rule list from a merged launcher table.
pub fn build_rules(table: &LauncherTable) -> Vec<RuleGroup> {
    let mut rules = vec![hyper::hyper_key_rules()];
    rules.extend(hyper::sublayer_rules(table));
    rules.extend(vim::all_groups());
    rules
}

/// Builds the whole single-profile document.
pub fn build_document(options: &DocumentOptions, table: &LauncherTable) -> KarabinerConfig {
    KarabinerConfig::new(
        options.profile_name.clone(),
        options.show_in_menu_bar,
        build_rules(table),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_order() {
        let table = hyper::common_table();
        let rules = build_rules(&table);

        assert_eq!(rules[0].description, "Hyper Key (⌃⌥⇧⌘)");
        // One group per sub-layer, then the Vim layer.
        let first_vim = 1 + table.len();
        assert_eq!(rules[first_vim].description, "Vim mode toggling");
        assert_eq!(
            rules.last().unwrap().description,
            "Vim mode - disable unused keys"
        );
    }

    #[test]
    fn test_document_is_deterministic() {
        let options = DocumentOptions::default();
        let table = hyper::common_table();
        let first = build_document(&options, &table).to_json().unwrap();
        let second = build_document(&options, &table).to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_has_one_profile() {
        let document = build_document(&DocumentOptions::default(), &hyper::common_table());
        assert_eq!(document.profiles.len(), 1);
        assert_eq!(document.profiles[0].name, "Default");
        assert!(!document.global.show_in_menu_bar);
    }
}
