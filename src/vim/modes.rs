//! Mode-transition rule generation.
//!
//! Expands the compact behavior tables into the full conditioned rule set
//! for every mode. The state machine lives entirely in the emitted data:
//! mode variables persisted by the host, guards reading them, and effects
//! writing them. Insert mode is the implicit default (no variable set).

use crate::models::{Condition, FromEvent, Manipulator, Modifier, RuleGroup, ToEvent};
use crate::vim::lockdown;
use crate::vim::notifications::{notify_insert_mode, notify_normal_mode};
use crate::vim::selection::{selection_rules, SelectionSpec};
use crate::vim::tables::{motion_table, normal_extras, KeyTable};
use crate::vim::vars;

/// Applications with their own modal editing; this layer stands down in
/// them so keys are never double-handled.
pub const NATIVE_VIM_BUNDLES: &[&str] = &[
    "com.jetbrains.webstorm",
    "com.jetbrains.pycharm",
    "com.jetbrains.idea",
    "com.microsoft.VSCode",
];

/// Expiry window for the transient g-pressed flag, in milliseconds.
pub const FLAG_EXPIRY_MS: u32 = 500;

/// Guard: the frontmost application does not implement native Vim.
pub fn not_in_native_vim() -> Condition {
    Condition::frontmost_unless(NATIVE_VIM_BUNDLES)
}

/// Guard: the frontmost application implements native Vim.
pub fn in_native_vim() -> Condition {
    Condition::frontmost_in(NATIVE_VIM_BUNDLES)
}

/// How a behavior table is rewritten for one mode.
#[derive(Debug, Clone)]
pub struct ModeContext {
    /// Mode name used in descriptions
    pub name: &'static str,
    /// The mode's variable; every expanded rule guards on it being set
    pub variable: &'static str,
    /// Inject shift into every emitted key event, turning plain cursor
    /// moves into selection-extending moves
    pub add_shift: bool,
    /// Trailing action appended to committing rules (e.g. cut)
    pub commit: Vec<ToEvent>,
    /// Mode-exit effects appended after the commit action
    pub exit: Vec<ToEvent>,
}

fn cut() -> ToEvent {
    ToEvent::key_with("x", &[Modifier::Command])
}

fn copy() -> ToEvent {
    ToEvent::key_with("c", &[Modifier::Command])
}

impl ModeContext {
    /// Normal mode: motions run as-is, nothing appended.
    pub fn normal() -> Self {
        Self {
            name: "Normal",
            variable: vars::NORMAL_MODE,
            add_shift: false,
            commit: Vec::new(),
            exit: Vec::new(),
        }
    }

    /// Visual mode: motions extend the selection, no trailing commit.
    pub fn visual() -> Self {
        Self {
            name: "Visual",
            variable: vars::VISUAL_MODE,
            add_shift: true,
            commit: Vec::new(),
            exit: Vec::new(),
        }
    }

    /// Delete mode: motions select, then cut, then return to Normal.
    pub fn delete() -> Self {
        Self {
            name: "Delete",
            variable: vars::DELETE_MODE,
            add_shift: true,
            commit: vec![cut()],
            exit: vec![
                ToEvent::deactivate(vars::DELETE_MODE),
                ToEvent::activate(vars::NORMAL_MODE),
            ],
        }
    }

    /// Yank mode: motions select, then copy, then return to Normal.
    pub fn yank() -> Self {
        Self {
            name: "Yank",
            variable: vars::YANK_MODE,
            add_shift: true,
            commit: vec![copy()],
            exit: vec![
                ToEvent::deactivate(vars::YANK_MODE),
                ToEvent::activate(vars::NORMAL_MODE),
            ],
        }
    }

    /// Change mode: motions select, then cut, then drop into Insert.
    pub fn change() -> Self {
        Self {
            name: "Change",
            variable: vars::CHANGE_MODE,
            add_shift: true,
            commit: vec![cut()],
            exit: vec![ToEvent::deactivate(vars::CHANGE_MODE), notify_insert_mode()],
        }
    }
}

/// Expands a behavior table into concrete rules for one mode.
///
/// Every rule is guarded on the mode variable and on not being inside a
/// native-Vim host. When the context carries commit/exit effects, they
/// are appended to each definition whose `commits` flag is set - the
/// g-cluster arm rule opts out, because arming a flag is not a text edit.
pub fn expand_motions(table: KeyTable, ctx: &ModeContext) -> Vec<Manipulator> {
    let mut manipulators = Vec::new();

    for (key, binding) in table {
        for def in binding.rules() {
            let from = match def.modifiers {
                Some(modifiers) => FromEvent::key_with(key, modifiers),
                None => FromEvent::key(key),
            };

            let mut to: Vec<ToEvent> = if ctx.add_shift {
                def.to.iter().map(ToEvent::with_shift).collect()
            } else {
                def.to
            };
            if def.commits {
                to.extend(ctx.commit.iter().cloned());
                to.extend(ctx.exit.iter().cloned());
            }

            let description = def
                .description
                .map_or_else(|| format!("Vim {} - {key}", ctx.name), |d| {
                    format!("Vim {} - {d}", ctx.name)
                });

            let mut manipulator = Manipulator::basic(from)
                .with_conditions([Condition::is_active(ctx.variable), not_in_native_vim()])
                .with_conditions(def.conditions)
                .with_to(to)
                .with_description(description);
            if let Some(delayed) = def.delayed {
                manipulator = manipulator.with_delayed_action(delayed, FLAG_EXPIRY_MS);
            }
            manipulators.push(manipulator);
        }
    }

    manipulators
}

/// A single rule scoped to one mode, built outside the table machinery.
fn mode_rule(key: &str, variable: &str, to: Vec<ToEvent>, description: &str) -> Manipulator {
    Manipulator::basic(FromEvent::key(key))
        .with_conditions([Condition::is_active(variable), not_in_native_vim()])
        .with_to(to)
        .with_description(description)
}

/// Entering and leaving the Vim layer, plus the stand-down rules forcing
/// Insert inside native-Vim hosts.
pub fn toggling_rules() -> RuleGroup {
    use crate::models::FromModifiers;

    let exit_to_insert = vec![
        ToEvent::deactivate(vars::NORMAL_MODE),
        ToEvent::deactivate(vars::G_PRESSED),
        notify_insert_mode(),
    ];

    let mut manipulators = vec![
        Manipulator::basic(FromEvent::key_with(
            "caps_lock",
            FromModifiers::mandatory(&[Modifier::RightShift]),
        ))
        .with_condition(not_in_native_vim())
        .with_conditions(vars::MODES.iter().map(|mode| Condition::not_active(*mode)))
        .with_to(vec![
            ToEvent::activate(vars::NORMAL_MODE),
            notify_normal_mode(),
        ])
        .with_description("Caps Lock + Right Shift - enter Normal mode"),
        mode_rule(
            "escape",
            vars::NORMAL_MODE,
            exit_to_insert.clone(),
            "Escape - back to Insert mode",
        ),
        mode_rule(
            "caps_lock",
            vars::NORMAL_MODE,
            exit_to_insert,
            "Caps Lock - back to Insert mode",
        ),
    ];

    // Native-Vim hosts own modal editing themselves; any keypress there
    // drops the stray mode and falls back to Insert.
    for mode in vars::MODES {
        manipulators.push(
            Manipulator::basic(FromEvent::any_key())
                .with_conditions([in_native_vim(), Condition::is_active(*mode)])
                .with_to(vec![
                    ToEvent::deactivate(*mode),
                    ToEvent::deactivate(vars::G_PRESSED),
                    ToEvent::deactivate(vars::INNER_SELECTION),
                    ToEvent::deactivate(vars::OUTER_SELECTION),
                    notify_insert_mode(),
                ])
                .with_description(format!("Stand down in native-Vim apps ({mode})")),
        );
    }

    RuleGroup::new("Vim mode toggling", manipulators)
}

/// Normal mode: transitions, edit actions, and the plain motion set.
pub fn normal_mode_rules() -> RuleGroup {
    let ctx = ModeContext::normal();
    let mut manipulators = expand_motions(normal_extras(), &ctx);
    manipulators.extend(expand_motions(motion_table(), &ctx));
    RuleGroup::new("Vim normal mode", manipulators)
}

/// Visual mode: selection objects, exits, operators on the selection,
/// and shift-rewritten motions.
pub fn visual_mode_rules() -> RuleGroup {
    let ctx = ModeContext::visual();

    let mut manipulators = selection_rules(&SelectionSpec {
        mode_name: ctx.name,
        variable: ctx.variable,
        action: Vec::new(),
        cleanup: vec![
            ToEvent::deactivate(vars::INNER_SELECTION),
            ToEvent::deactivate(vars::OUTER_SELECTION),
        ],
    });

    let back_to_normal = vec![
        ToEvent::deactivate(vars::VISUAL_MODE),
        ToEvent::deactivate(vars::INNER_SELECTION),
        ToEvent::deactivate(vars::OUTER_SELECTION),
        ToEvent::activate(vars::NORMAL_MODE),
        notify_normal_mode(),
    ];
    for (key, description) in [
        ("v", "v - back to Normal mode"),
        ("escape", "Escape - back to Normal mode"),
        ("caps_lock", "Caps Lock - back to Normal mode"),
    ] {
        manipulators.push(mode_rule(
            key,
            vars::VISUAL_MODE,
            back_to_normal.clone(),
            &format!("Vim Visual - {description}"),
        ));
    }

    let commit_to_normal = |action: ToEvent| {
        vec![
            action,
            ToEvent::deactivate(vars::VISUAL_MODE),
            ToEvent::activate(vars::NORMAL_MODE),
            notify_normal_mode(),
        ]
    };
    manipulators.push(mode_rule(
        "d",
        vars::VISUAL_MODE,
        commit_to_normal(cut()),
        "Vim Visual - d - cut the selection",
    ));
    manipulators.push(mode_rule(
        "x",
        vars::VISUAL_MODE,
        commit_to_normal(cut()),
        "Vim Visual - x - cut the selection",
    ));
    manipulators.push(mode_rule(
        "y",
        vars::VISUAL_MODE,
        commit_to_normal(copy()),
        "Vim Visual - y - yank the selection",
    ));
    manipulators.push(mode_rule(
        "c",
        vars::VISUAL_MODE,
        vec![
            cut(),
            ToEvent::deactivate(vars::VISUAL_MODE),
            notify_insert_mode(),
        ],
        "Vim Visual - c - change the selection",
    ));

    manipulators.extend(expand_motions(motion_table(), &ctx));
    RuleGroup::new("Vim visual mode", manipulators)
}

/// Shared structure of the three pending modes (Delete, Yank, Change):
/// selection objects first, then the doubled-key line action, aborts, and
/// the rewritten motions.
fn pending_mode_group(
    ctx: &ModeContext,
    group: &str,
    line_key: &str,
    line_selection: Vec<ToEvent>,
    line_description: &str,
) -> RuleGroup {
    let mut cleanup = vec![
        ToEvent::deactivate(vars::INNER_SELECTION),
        ToEvent::deactivate(vars::OUTER_SELECTION),
    ];
    cleanup.extend(ctx.exit.iter().cloned());

    let mut manipulators = selection_rules(&SelectionSpec {
        mode_name: ctx.name,
        variable: ctx.variable,
        action: ctx.commit.clone(),
        cleanup,
    });

    let mut line_to = line_selection;
    line_to.extend(ctx.commit.iter().cloned());
    line_to.extend(ctx.exit.iter().cloned());
    manipulators.push(mode_rule(line_key, ctx.variable, line_to, line_description));

    // Escape/Caps Lock abort the pending operation; nothing is applied.
    let abort = vec![
        ToEvent::deactivate(ctx.variable),
        ToEvent::deactivate(vars::INNER_SELECTION),
        ToEvent::deactivate(vars::OUTER_SELECTION),
        ToEvent::activate(vars::NORMAL_MODE),
    ];
    for key in ["escape", "caps_lock"] {
        manipulators.push(mode_rule(
            key,
            ctx.variable,
            abort.clone(),
            &format!("Vim {} - abort back to Normal mode", ctx.name),
        ));
    }

    manipulators.extend(expand_motions(motion_table(), ctx));
    RuleGroup::new(group, manipulators)
}

/// Key events selecting the whole current line, including the newline.
fn select_line_with_newline() -> Vec<ToEvent> {
    vec![
        ToEvent::key_with("left_arrow", &[Modifier::Command]),
        ToEvent::key_with("right_arrow", &[Modifier::Command, Modifier::Shift]),
        ToEvent::key_with("right_arrow", &[Modifier::Shift]),
    ]
}

/// Key events selecting the current line's text, excluding the newline.
fn select_line() -> Vec<ToEvent> {
    vec![
        ToEvent::key_with("left_arrow", &[Modifier::Command]),
        ToEvent::key_with("right_arrow", &[Modifier::Command, Modifier::Shift]),
    ]
}

/// Delete mode.
pub fn delete_mode_rules() -> RuleGroup {
    pending_mode_group(
        &ModeContext::delete(),
        "Vim delete mode",
        "d",
        select_line_with_newline(),
        "Vim Delete - dd - delete the line",
    )
}

/// Yank mode.
pub fn yank_mode_rules() -> RuleGroup {
    pending_mode_group(
        &ModeContext::yank(),
        "Vim yank mode",
        "y",
        select_line(),
        "Vim Yank - yy - yank the line",
    )
}

/// Change mode.
pub fn change_mode_rules() -> RuleGroup {
    pending_mode_group(
        &ModeContext::change(),
        "Vim change mode",
        "c",
        select_line(),
        "Vim Change - cc - change the line",
    )
}

/// All Vim rule groups, in evaluation order. The lockdown group comes
/// last so explicit bindings win before the catch-all swallows the rest.
pub fn all_groups() -> Vec<RuleGroup> {
    vec![
        toggling_rules(),
        normal_mode_rules(),
        visual_mode_rules(),
        delete_mode_rules(),
        yank_mode_rules(),
        change_mode_rules(),
        lockdown::lockdown_rules(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vim::tables::{Binding, KeyRule};

    #[test]
    fn test_visual_rewrite_of_a_single_motion() {
        // Minimal motion table {h: moveLeft} through the Visual rewrite.
        let table = vec![(
            "h",
            Binding::One(KeyRule::emit(vec![ToEvent::key("left_arrow")])),
        )];
        let rules = expand_motions(table, &ModeContext::visual());

        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0].to,
            vec![ToEvent::key_with("left_arrow", &[Modifier::Shift])]
        );
        assert!(rules[0]
            .conditions
            .contains(&Condition::is_active(vars::VISUAL_MODE)));
        assert!(rules[0].conditions.contains(&not_in_native_vim()));
    }

    #[test]
    fn test_delete_rewrite_appends_commit_and_exit() {
        let table = vec![(
            "w",
            Binding::One(KeyRule::emit(vec![ToEvent::key_with(
                "right_arrow",
                &[Modifier::Option],
            )])),
        )];
        let rules = expand_motions(table, &ModeContext::delete());

        assert_eq!(
            rules[0].to,
            vec![
                ToEvent::key_with("right_arrow", &[Modifier::Option, Modifier::Shift]),
                ToEvent::key_with("x", &[Modifier::Command]),
                ToEvent::deactivate(vars::DELETE_MODE),
                ToEvent::activate(vars::NORMAL_MODE),
            ]
        );
    }

    #[test]
    fn test_g_cluster_arm_is_excluded_from_commit_rewrite() {
        let rules = expand_motions(motion_table(), &ModeContext::delete());
        let g_rules: Vec<_> = rules
            .iter()
            .filter(|m| m.from.key_code() == Some("g"))
            .collect();
        assert_eq!(g_rules.len(), 3);

        // Arm rule: only sets the flag, no cut appended.
        assert_eq!(g_rules[0].to, vec![ToEvent::activate(vars::G_PRESSED)]);
        assert!(g_rules[0].to_delayed_action.is_some());
        assert_eq!(
            g_rules[0]
                .parameters
                .unwrap()
                .to_delayed_action_delay_milliseconds,
            Some(FLAG_EXPIRY_MS)
        );

        // gg: shift-rewritten jump, then cut, then exit effects.
        assert_eq!(
            g_rules[1].to,
            vec![
                ToEvent::deactivate(vars::G_PRESSED),
                ToEvent::key_with("up_arrow", &[Modifier::Command, Modifier::Shift]),
                ToEvent::key_with("x", &[Modifier::Command]),
                ToEvent::deactivate(vars::DELETE_MODE),
                ToEvent::activate(vars::NORMAL_MODE),
            ]
        );
    }

    #[test]
    fn test_change_mode_exit_enters_insert() {
        let table = vec![(
            "e",
            Binding::One(KeyRule::emit(vec![ToEvent::key_with(
                "right_arrow",
                &[Modifier::Option],
            )])),
        )];
        let rules = expand_motions(table, &ModeContext::change());
        let last = rules[0].to.last().unwrap();

        // Change drops into Insert: no mode variable is re-activated.
        assert!(matches!(last, ToEvent::Shell { .. }));
        assert!(!rules[0]
            .to
            .iter()
            .any(|e| e.variable_name() == Some(vars::NORMAL_MODE)));
    }

    #[test]
    fn test_normal_mode_motions_are_not_shift_rewritten() {
        let rules = expand_motions(motion_table(), &ModeContext::normal());
        let h_rule = rules
            .iter()
            .find(|m| m.from.key_code() == Some("h"))
            .unwrap();
        assert_eq!(h_rule.to, vec![ToEvent::key("left_arrow")]);
    }

    #[test]
    fn test_toggling_enter_rule_guards() {
        let group = toggling_rules();
        let enter = &group.manipulators[0];
        // The entry chord requires every mode variable unset; firing it
        // mid-Visual (or mid-pending) would leave two mode flags set.
        for mode in vars::MODES {
            assert!(enter.conditions.contains(&Condition::not_active(*mode)));
        }
        assert!(enter.conditions.contains(&not_in_native_vim()));
        assert!(enter.to.contains(&ToEvent::activate(vars::NORMAL_MODE)));
    }

    #[test]
    fn test_stand_down_rules_cover_every_mode() {
        let group = toggling_rules();
        for mode in vars::MODES {
            assert!(
                group.manipulators.iter().any(|m| {
                    m.conditions.contains(&in_native_vim())
                        && m.conditions.contains(&Condition::is_active(*mode))
                }),
                "missing stand-down rule for {mode}"
            );
        }
    }

    #[test]
    fn test_selection_commit_precedes_motion_w_in_pending_groups() {
        // First-match-wins: with a selection flag set, `w` must commit the
        // text object, not run the word motion.
        for group in [delete_mode_rules(), yank_mode_rules(), change_mode_rules()] {
            let w_positions: Vec<_> = group
                .manipulators
                .iter()
                .enumerate()
                .filter(|(_, m)| m.from.key_code() == Some("w"))
                .collect();
            assert!(w_positions.len() >= 3, "{}", group.description);
            let motion_w = w_positions.last().unwrap();
            // The last w rule is the plain motion; all commit rules come
            // before it and carry a selection-flag guard.
            for (idx, rule) in &w_positions[..w_positions.len() - 1] {
                assert!(idx < &motion_w.0);
                assert!(rule
                    .conditions
                    .iter()
                    .any(|c| c.variable_name() == Some(vars::INNER_SELECTION)
                        || c.variable_name() == Some(vars::OUTER_SELECTION)));
            }
        }
    }

    #[test]
    fn test_all_groups_order() {
        let groups = all_groups();
        let descriptions: Vec<_> = groups.iter().map(|g| g.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Vim mode toggling",
                "Vim normal mode",
                "Vim visual mode",
                "Vim delete mode",
                "Vim yank mode",
                "Vim change mode",
                "Vim mode - disable unused keys",
            ]
        );
    }
}
