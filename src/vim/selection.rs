//! Inner/outer text-object selection rules (`iw` / `aw`).
//!
//! One shared builder parameterized by mode, so Delete, Yank, Change and
//! Visual reuse identical selection behavior instead of four hand-written
//! near-duplicates.

use crate::models::{Condition, FromEvent, Manipulator, ToEvent};
use crate::vim::modes::not_in_native_vim;
use crate::vim::vars;

/// Parameters for one mode's selection rules.
#[derive(Debug, Clone)]
pub struct SelectionSpec<'a> {
    /// Mode name for rule descriptions (e.g. "Delete")
    pub mode_name: &'a str,
    /// The mode's variable; all four rules guard on it
    pub variable: &'a str,
    /// Effects run after the selection is made (e.g. cut for Delete)
    pub action: Vec<ToEvent>,
    /// Effects restoring mode state after the action
    pub cleanup: Vec<ToEvent>,
}

/// Key events selecting the inner word: move left by word, then
/// extend-select right by word.
fn select_inner_word() -> Vec<ToEvent> {
    use crate::models::Modifier::{Option, Shift};
    vec![
        ToEvent::key_with("left_arrow", &[Option]),
        ToEvent::key_with("right_arrow", &[Option, Shift]),
    ]
}

/// Key events selecting the outer word: the inner selection plus one
/// extend-select right by character, to include trailing whitespace.
fn select_outer_word() -> Vec<ToEvent> {
    use crate::models::Modifier::Shift;
    let mut events = select_inner_word();
    events.push(ToEvent::key_with("right_arrow", &[Shift]));
    events
}

/// Builds the four selection rules for one mode: arm-inner, arm-outer,
/// commit-inner, commit-outer.
///
/// The arm rules require that no selection flag is already pending; the
/// commit rules fire on `w` with the corresponding flag set, run the
/// selection key events, then the mode's action and cleanup.
pub fn selection_rules(spec: &SelectionSpec<'_>) -> Vec<Manipulator> {
    let arm = |key: &str, flag: &str, kind: &str| {
        Manipulator::basic(FromEvent::key(key))
            .with_conditions([
                Condition::is_active(spec.variable),
                not_in_native_vim(),
                Condition::not_active(vars::INNER_SELECTION),
                Condition::not_active(vars::OUTER_SELECTION),
            ])
            .with_to(vec![ToEvent::activate(flag)])
            .with_description(format!(
                "Vim {} - {key} arms an {kind} selection",
                spec.mode_name
            ))
    };

    let commit = |flag: &str, selection: Vec<ToEvent>, kind: &str| {
        let mut to = selection;
        to.extend(spec.action.iter().cloned());
        to.extend(spec.cleanup.iter().cloned());
        Manipulator::basic(FromEvent::key("w"))
            .with_conditions([
                Condition::is_active(spec.variable),
                not_in_native_vim(),
                Condition::is_active(flag),
            ])
            .with_to(to)
            .with_description(format!(
                "Vim {} - commit the {kind} word selection",
                spec.mode_name
            ))
    };

    vec![
        arm("i", vars::INNER_SELECTION, "inner"),
        arm("a", vars::OUTER_SELECTION, "outer"),
        commit(vars::INNER_SELECTION, select_inner_word(), "inner"),
        commit(vars::OUTER_SELECTION, select_outer_word(), "outer"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Modifier::{Command, Option, Shift};

    fn delete_spec() -> SelectionSpec<'static> {
        SelectionSpec {
            mode_name: "Delete",
            variable: vars::DELETE_MODE,
            action: vec![ToEvent::key_with("x", &[Command])],
            cleanup: vec![
                ToEvent::deactivate(vars::INNER_SELECTION),
                ToEvent::deactivate(vars::OUTER_SELECTION),
                ToEvent::deactivate(vars::DELETE_MODE),
                ToEvent::activate(vars::NORMAL_MODE),
            ],
        }
    }

    #[test]
    fn test_emits_exactly_four_rules() {
        let rules = selection_rules(&delete_spec());
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_arm_rules_require_no_pending_flag() {
        let rules = selection_rules(&delete_spec());
        for arm in &rules[..2] {
            assert!(arm
                .conditions
                .contains(&Condition::not_active(vars::INNER_SELECTION)));
            assert!(arm
                .conditions
                .contains(&Condition::not_active(vars::OUTER_SELECTION)));
        }
        assert_eq!(rules[0].to, vec![ToEvent::activate(vars::INNER_SELECTION)]);
        assert_eq!(rules[1].to, vec![ToEvent::activate(vars::OUTER_SELECTION)]);
    }

    #[test]
    fn test_commit_inner_effect_ordering() {
        let rules = selection_rules(&delete_spec());
        let commit_inner = &rules[2];

        // Exactly two cursor-selection key events, then the action, then
        // the flag teardown. No extend-left-word: the left move is plain.
        assert_eq!(
            commit_inner.to,
            vec![
                ToEvent::key_with("left_arrow", &[Option]),
                ToEvent::key_with("right_arrow", &[Option, Shift]),
                ToEvent::key_with("x", &[Command]),
                ToEvent::deactivate(vars::INNER_SELECTION),
                ToEvent::deactivate(vars::OUTER_SELECTION),
                ToEvent::deactivate(vars::DELETE_MODE),
                ToEvent::activate(vars::NORMAL_MODE),
            ]
        );
    }

    #[test]
    fn test_commit_outer_includes_trailing_whitespace_step() {
        let rules = selection_rules(&delete_spec());
        let commit_outer = &rules[3];
        assert_eq!(
            commit_outer.to[..3],
            [
                ToEvent::key_with("left_arrow", &[Option]),
                ToEvent::key_with("right_arrow", &[Option, Shift]),
                ToEvent::key_with("right_arrow", &[Shift]),
            ]
        );
    }

    #[test]
    fn test_commit_rules_guard_on_their_flag() {
        let rules = selection_rules(&delete_spec());
        assert!(rules[2]
            .conditions
            .contains(&Condition::is_active(vars::INNER_SELECTION)));
        assert!(rules[3]
            .conditions
            .contains(&Condition::is_active(vars::OUTER_SELECTION)));
    }
}
