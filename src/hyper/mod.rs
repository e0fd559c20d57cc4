//! The Hyper Key and its launcher sub-layers.
//!
//! Caps Lock, when held, sets the `hyper` variable gating the whole
//! launcher layer; tapped alone it emits Escape. Each top-level launcher
//! key opens a sub-layer (tracked by its own variable) whose keys trigger
//! application launches, deeplinks, shell commands or raw key events.

pub mod actions;
pub mod layers;

pub use actions::LauncherAction;
pub use layers::{common_table, load_overrides, merge, LauncherTable, SubLayer};

use crate::models::{
    Condition, FromEvent, FromModifiers, Manipulator, Modifier, RuleGroup, ToEvent,
};
use crate::vim::vars;

/// The host variable tracking one sub-layer.
pub fn sublayer_variable(key: &str) -> String {
    format!("{}{key}", vars::HYPER_SUBLAYER_PREFIX)
}

/// The Hyper Key group: Caps Lock held is Hyper, tapped alone is Escape.
///
/// Right shift stays out of the optional modifiers so Caps Lock + Right
/// Shift remains free to enter the Vim layer. The rule stands down while
/// any Vim mode is engaged; this group is evaluated first, so a bare
/// Caps Lock press in Visual or a pending mode must fall through to that
/// mode's own exit rule rather than arming the launcher.
pub fn hyper_key_rules() -> RuleGroup {
    let manipulator = Manipulator::basic(FromEvent::key_with(
        "caps_lock",
        FromModifiers::optional(&[
            Modifier::Command,
            Modifier::Control,
            Modifier::Option,
            Modifier::Fn,
        ]),
    ))
    .with_conditions(vars::MODES.iter().map(|mode| Condition::not_active(*mode)))
    .with_to(vec![ToEvent::activate(vars::HYPER)])
    .with_to_after_key_up(vec![ToEvent::deactivate(vars::HYPER)])
    .with_to_if_alone(vec![ToEvent::key("escape")])
    .with_description("Caps Lock -> Hyper Key");

    RuleGroup::new("Hyper Key (⌃⌥⇧⌘)", vec![manipulator])
}

/// One rule group per sub-layer, in table order.
///
/// The activation rule fires while Hyper is held and no other sub-layer
/// is active, so two sub-layers can never be armed at once. Sub-layer
/// keys are guarded on their sub-layer's variable alone; Hyper itself may
/// already be released by the time the second key goes down.
pub fn sublayer_rules(table: &LauncherTable) -> Vec<RuleGroup> {
    let all_keys: Vec<&str> = table.keys().map(String::as_str).collect();

    table
        .iter()
        .map(|(key, sub)| {
            let variable = sublayer_variable(key);

            let mut manipulators = vec![Manipulator::basic(FromEvent::key(key.clone()))
                .with_condition(Condition::is_active(vars::HYPER))
                .with_conditions(
                    all_keys
                        .iter()
                        .filter(|other| *other != key)
                        .map(|other| Condition::not_active(sublayer_variable(other))),
                )
                .with_to(vec![ToEvent::activate(&variable)])
                .with_to_after_key_up(vec![ToEvent::deactivate(&variable)])
                .with_description(format!("Toggle Hyper sub-layer {key}"))];

            for (sub_key, action) in sub {
                manipulators.push(
                    Manipulator::basic(FromEvent::key(sub_key.clone()))
                        .with_condition(Condition::is_active(&variable))
                        .with_to(action.to_events())
                        .with_description(format!("Hyper {key} {sub_key}")),
                );
            }

            RuleGroup::new(format!("Hyper sub-layer \"{key}\""), manipulators)
        })
        .collect()
}
