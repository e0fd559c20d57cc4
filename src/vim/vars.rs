//! The variable registry.
//!
//! A fixed namespace of boolean state slots the host application persists
//! across key events. Values exist only at host runtime (absent means
//! falsy); this generator only ever emits write-effects and read-guards
//! against these names. Every name a guard or effect uses must come from
//! here - a typo would silently become a new, unintended host-side
//! variable, which is exactly what the validator rejects.

/// Normal mode engaged.
pub const NORMAL_MODE: &str = "vim_mode";
/// Visual (selection) mode engaged.
pub const VISUAL_MODE: &str = "vim_visual_mode";
/// Delete pending mode engaged. Not a proper Vim mode, but tracks that
/// the next motion should delete.
pub const DELETE_MODE: &str = "vim_delete_mode";
/// Yank pending mode engaged.
pub const YANK_MODE: &str = "vim_yank_mode";
/// Change pending mode engaged.
pub const CHANGE_MODE: &str = "vim_change_mode";
/// Transient flag: first `g` of a `gg` sequence was pressed.
pub const G_PRESSED: &str = "g_pressed";
/// Inner text-object selection pending (`iw`).
pub const INNER_SELECTION: &str = "vim_inner_selection";
/// Outer text-object selection pending (`aw`).
pub const OUTER_SELECTION: &str = "vim_outer_selection";
/// The hyper key is held.
pub const HYPER: &str = "hyper";
/// Prefix of the per-sub-layer variables (`hyper_sublayer_o`, ...).
pub const HYPER_SUBLAYER_PREFIX: &str = "hyper_sublayer_";

/// The mutually-exclusive mode variables. Exclusion is a rule-construction
/// convention, not a structural guarantee; the validator checks that no
/// single rule *requires* two of these at once.
pub const MODES: &[&str] = &[NORMAL_MODE, VISUAL_MODE, DELETE_MODE, YANK_MODE, CHANGE_MODE];

/// Every fixed variable name in the registry.
pub const ALL: &[&str] = &[
    NORMAL_MODE,
    VISUAL_MODE,
    DELETE_MODE,
    YANK_MODE,
    CHANGE_MODE,
    G_PRESSED,
    INNER_SELECTION,
    OUTER_SELECTION,
    HYPER,
];

/// Checks whether `name` belongs to the registry. Sub-layer variables are
/// a generated family, accepted by prefix.
pub fn is_registered(name: &str) -> bool {
    ALL.contains(&name)
        || name
            .strip_prefix(HYPER_SUBLAYER_PREFIX)
            .is_some_and(|suffix| !suffix.is_empty())
}
