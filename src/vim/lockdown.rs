//! Catch-all rules preventing keystrokes from leaking through to the
//! focused application while a mode is engaged.
//!
//! Per active-mode variable: every allow-listed navigation/modifier key
//! remaps to itself, then a final any-key rule with no effects swallows
//! everything else. This group must be the last one in the document so
//! explicit mode bindings match first.

use crate::keycodes::LOCKDOWN_ALLOWED;
use crate::models::{Condition, FromEvent, FromModifiers, Manipulator, Modifier, RuleGroup, ToEvent};
use crate::vim::modes::not_in_native_vim;
use crate::vim::vars;

/// Builds the lockdown group.
pub fn lockdown_rules() -> RuleGroup {
    let mut manipulators = Vec::new();

    for mode in vars::MODES {
        for key in LOCKDOWN_ALLOWED {
            manipulators.push(
                Manipulator::basic(FromEvent::key_with(
                    *key,
                    FromModifiers::optional(&[Modifier::Any]),
                ))
                .with_conditions([Condition::is_active(*mode), not_in_native_vim()])
                .with_to(vec![ToEvent::key(*key)]),
            );
        }
        manipulators.push(
            Manipulator::basic(FromEvent::any_key())
                .with_conditions([Condition::is_active(*mode), not_in_native_vim()])
                .with_description(format!("Swallow unbound keys while {mode} is set")),
        );
    }

    RuleGroup::new("Vim mode - disable unused keys", manipulators)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_catch_all_per_mode() {
        let group = lockdown_rules();
        let catch_alls: Vec<_> = group
            .manipulators
            .iter()
            .filter(|m| m.from.key_code().is_none())
            .collect();
        assert_eq!(catch_alls.len(), vars::MODES.len());
        for rule in catch_alls {
            // No effects: the key is consumed.
            assert!(rule.to.is_empty());
        }
    }

    #[test]
    fn test_allowed_keys_self_map_before_the_catch_all() {
        let group = lockdown_rules();
        for mode in vars::MODES {
            let mode_rules: Vec<_> = group
                .manipulators
                .iter()
                .filter(|m| m.conditions.contains(&Condition::is_active(*mode)))
                .collect();
            assert_eq!(mode_rules.len(), LOCKDOWN_ALLOWED.len() + 1);
            // The catch-all is last within the mode's run of rules.
            assert!(mode_rules.last().unwrap().from.key_code().is_none());
            for (rule, key) in mode_rules.iter().zip(LOCKDOWN_ALLOWED) {
                assert_eq!(rule.from.key_code(), Some(*key));
                assert_eq!(rule.to, vec![ToEvent::key(*key)]);
            }
        }
    }
}
