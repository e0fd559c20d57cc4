//! Compact per-key behavior tables the mode generator expands.
//!
//! A table maps a trigger key to either one rule definition or an ordered
//! list of definitions for the same key. The list form expresses
//! "first press vs. second press" sequencing (the `g`/`gg`/`G` cluster):
//! each element becomes an independent rule distinguished by its own
//! guard list. `Binding::rules` is the single normalization point, so the
//! rest of the generator never branches on the shape.

use crate::models::{Condition, DelayedAction, FromModifiers, Modifier, ToEvent};
use crate::vim::notifications::{notify_insert_mode, notify_visual_mode};
use crate::vim::vars;

/// One rule definition in a behavior table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRule {
    /// Ordered effects for this key
    pub to: Vec<ToEvent>,
    /// Modifier constraint on the trigger key, if any
    pub modifiers: Option<FromModifiers>,
    /// Extra guard conditions beyond the mode guards
    pub conditions: Vec<Condition>,
    /// Host-native delayed action (used to expire transient flags)
    pub delayed: Option<DelayedAction>,
    /// Whether the trailing commit rewrite applies to this definition when
    /// the table is reused inside a pending mode
    pub commits: bool,
    /// Description override
    pub description: Option<String>,
}

impl KeyRule {
    /// Creates a definition emitting `to`, participating in the commit
    /// rewrite by default.
    pub fn emit(to: Vec<ToEvent>) -> Self {
        Self {
            to,
            modifiers: None,
            conditions: Vec::new(),
            delayed: None,
            commits: true,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requires `modifiers` to be held on the trigger key.
    pub fn with_mandatory(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = Some(FromModifiers::mandatory(modifiers));
        self
    }

    /// Appends an extra guard condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Attaches a delayed action.
    pub fn with_delayed(mut self, delayed: DelayedAction) -> Self {
        self.delayed = Some(delayed);
        self
    }

    /// Excludes this definition from the trailing commit rewrite. Arming a
    /// transient flag is not itself a text edit.
    pub fn without_commit(mut self) -> Self {
        self.commits = false;
        self
    }
}

/// A table entry: one definition, or an ordered list sharing the trigger key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A single rule definition
    One(KeyRule),
    /// Ordered definitions disambiguated by their own guards
    Seq(Vec<KeyRule>),
}

impl Binding {
    /// Normalizes to a flat, ordered definition list.
    pub fn rules(self) -> Vec<KeyRule> {
        match self {
            Self::One(rule) => vec![rule],
            Self::Seq(rules) => rules,
        }
    }
}

/// A behavior table: trigger key to binding, in evaluation order.
pub type KeyTable = Vec<(&'static str, Binding)>;

fn motion(key_code: &str, modifiers: &[Modifier]) -> Binding {
    Binding::One(KeyRule::emit(vec![ToEvent::key_with(key_code, modifiers)]))
}

/// The `g` cluster: exactly three definitions for the `g` trigger key.
///
/// The first press arms the transient flag and starts the expiry timer;
/// the second press (flag set) goes to the top of the document; `G`
/// (shift held) goes to the bottom regardless of the flag. The first two
/// are mutually exclusive by construction: they guard on the flag being
/// unset and set respectively.
pub fn g_cluster() -> Binding {
    Binding::Seq(vec![
        KeyRule::emit(vec![ToEvent::activate(vars::G_PRESSED)])
            .with_condition(Condition::not_active(vars::G_PRESSED))
            .with_delayed(DelayedAction {
                to_if_invoked: vec![ToEvent::deactivate(vars::G_PRESSED)],
                to_if_canceled: vec![ToEvent::deactivate(vars::G_PRESSED)],
            })
            .without_commit()
            .with_description("g - await a second g"),
        KeyRule::emit(vec![
            ToEvent::deactivate(vars::G_PRESSED),
            ToEvent::key_with("up_arrow", &[Modifier::Command]),
        ])
        .with_condition(Condition::is_active(vars::G_PRESSED))
        .with_description("gg - go to the top"),
        KeyRule::emit(vec![ToEvent::key_with("down_arrow", &[Modifier::Command])])
            .with_mandatory(&[Modifier::Shift])
            .with_description("G - go to the bottom"),
    ])
}

/// The shared motion table, reused by Normal, Visual, Delete, Yank and
/// Change modes. When reused inside a pending mode the expansion rewrites
/// every emitted key event with shift and appends the mode's commit
/// action.
pub fn motion_table() -> KeyTable {
    vec![
        ("h", motion("left_arrow", &[])),
        ("j", motion("down_arrow", &[])),
        ("k", motion("up_arrow", &[])),
        ("l", motion("right_arrow", &[])),
        (
            "w",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("right_arrow", &[Modifier::Option])])
                    .with_description("w - move to the next word"),
            ),
        ),
        (
            "b",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("left_arrow", &[Modifier::Option])])
                    .with_description("b - move to the previous word"),
            ),
        ),
        (
            "e",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("right_arrow", &[Modifier::Option])])
                    .with_description("e - move to the end of the word"),
            ),
        ),
        (
            "0",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("left_arrow", &[Modifier::Command])])
                    .with_description("0 - move to the beginning of the line"),
            ),
        ),
        // Shift + 6 = ^
        (
            "6",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("left_arrow", &[Modifier::Command])])
                    .with_mandatory(&[Modifier::Shift])
                    .with_description("^ - move to the beginning of the line"),
            ),
        ),
        // Shift + 4 = $
        (
            "4",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("right_arrow", &[Modifier::Command])])
                    .with_mandatory(&[Modifier::Shift])
                    .with_description("$ - move to the end of the line"),
            ),
        ),
        ("g", g_cluster()),
    ]
}

/// Normal-mode-only bindings: transitions into Insert/Visual/pending
/// modes and the direct edit actions. Never reused in other modes.
pub fn normal_extras() -> KeyTable {
    vec![
        (
            "i",
            Binding::One(
                KeyRule::emit(vec![
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    notify_insert_mode(),
                ])
                .with_description("i - enter Insert mode"),
            ),
        ),
        (
            "a",
            Binding::Seq(vec![
                KeyRule::emit(vec![
                    ToEvent::key("right_arrow"),
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    notify_insert_mode(),
                ])
                .with_description("a - insert after the cursor"),
                KeyRule::emit(vec![
                    ToEvent::key_with("right_arrow", &[Modifier::Command]),
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    notify_insert_mode(),
                ])
                .with_mandatory(&[Modifier::Shift])
                .with_description("A - insert at the end of the line"),
            ]),
        ),
        (
            "o",
            Binding::Seq(vec![
                KeyRule::emit(vec![
                    ToEvent::key_with("right_arrow", &[Modifier::Command]),
                    ToEvent::key("return_or_enter"),
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    notify_insert_mode(),
                ])
                .with_description("o - open a line below"),
                KeyRule::emit(vec![
                    ToEvent::key_with("left_arrow", &[Modifier::Command]),
                    ToEvent::key("return_or_enter"),
                    ToEvent::key("up_arrow"),
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    notify_insert_mode(),
                ])
                .with_mandatory(&[Modifier::Shift])
                .with_description("O - open a line above"),
            ]),
        ),
        (
            "v",
            Binding::One(
                KeyRule::emit(vec![
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    ToEvent::activate(vars::VISUAL_MODE),
                    notify_visual_mode(),
                ])
                .with_description("v - enter Visual mode"),
            ),
        ),
        (
            "d",
            Binding::One(
                KeyRule::emit(vec![
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    ToEvent::activate(vars::DELETE_MODE),
                ])
                .with_description("d - await a delete target"),
            ),
        ),
        (
            "y",
            Binding::One(
                KeyRule::emit(vec![
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    ToEvent::activate(vars::YANK_MODE),
                ])
                .with_description("y - await a yank target"),
            ),
        ),
        (
            "c",
            Binding::One(
                KeyRule::emit(vec![
                    ToEvent::deactivate(vars::NORMAL_MODE),
                    ToEvent::activate(vars::CHANGE_MODE),
                ])
                .with_description("c - await a change target"),
            ),
        ),
        (
            "x",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key("delete_forward")])
                    .with_description("x - delete the character under the cursor"),
            ),
        ),
        (
            "u",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("z", &[Modifier::Command])])
                    .with_description("u - undo"),
            ),
        ),
        (
            "p",
            Binding::One(
                KeyRule::emit(vec![ToEvent::key_with("v", &[Modifier::Command])])
                    .with_description("p - paste"),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_normalization() {
        let one = Binding::One(KeyRule::emit(vec![ToEvent::key("left_arrow")]));
        assert_eq!(one.rules().len(), 1);

        let seq = Binding::Seq(vec![
            KeyRule::emit(vec![ToEvent::key("left_arrow")]),
            KeyRule::emit(vec![ToEvent::key("right_arrow")]),
        ]);
        assert_eq!(seq.rules().len(), 2);
    }

    #[test]
    fn test_g_cluster_has_three_definitions() {
        let rules = g_cluster().rules();
        assert_eq!(rules.len(), 3);

        // First press: flag unset, arms the flag, excluded from commits.
        assert_eq!(
            rules[0].conditions,
            vec![Condition::not_active(vars::G_PRESSED)]
        );
        assert!(!rules[0].commits);
        assert!(rules[0].delayed.is_some());

        // Second press: flag set, commits.
        assert_eq!(
            rules[1].conditions,
            vec![Condition::is_active(vars::G_PRESSED)]
        );
        assert!(rules[1].commits);

        // Shift variant: no flag guard, distinguished by the modifier.
        assert!(rules[2].conditions.is_empty());
        assert_eq!(
            rules[2].modifiers,
            Some(FromModifiers::mandatory(&[Modifier::Shift]))
        );
    }

    #[test]
    fn test_g_cluster_arm_and_commit_guards_are_mutually_exclusive() {
        let rules = g_cluster().rules();
        // No host variable state can satisfy both variable_if and
        // variable_unless over the same name.
        let arm = &rules[0].conditions[0];
        let commit = &rules[1].conditions[0];
        assert_eq!(arm.variable_name(), commit.variable_name());
        assert_ne!(arm, commit);
    }

    #[test]
    fn test_motion_table_keys_are_unique() {
        let table = motion_table();
        let mut keys: Vec<_> = table.iter().map(|(key, _)| *key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), table.len());
    }
}
