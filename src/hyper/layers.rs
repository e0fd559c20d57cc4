//! The launcher tables and their merge semantics.
//!
//! A launcher table maps a top-level sub-layer key to a sub-table of
//! trigger keys and actions. The built-in common table is merged with an
//! optional per-machine overrides table (private deeplinks, work apps)
//! loaded from a TOML file at generation time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::hyper::actions::LauncherAction;
use crate::models::Modifier;

/// One sub-layer: trigger key to action.
pub type SubLayer = BTreeMap<String, LauncherAction>;

/// A full launcher table: sub-layer key to sub-layer.
///
/// BTreeMap keeps iteration order deterministic, which the byte-identical
/// output guarantee depends on.
pub type LauncherTable = BTreeMap<String, SubLayer>;

/// Merges `overrides` into `base`, one level deep.
///
/// For every top-level key present in `overrides`, the resulting
/// sub-table is the shallow union of both sub-tables with override
/// entries winning per leaf key. Top-level keys present only in `base`
/// pass through unchanged. Deliberately non-recursive (the table is two
/// levels by construction), with an explicit precedence rule instead of
/// spread-operator semantics.
pub fn merge(base: &LauncherTable, overrides: &LauncherTable) -> LauncherTable {
    let mut merged = base.clone();
    for (key, sub_overrides) in overrides {
        let sub = merged.entry(key.clone()).or_default();
        for (sub_key, action) in sub_overrides {
            sub.insert(sub_key.clone(), action.clone());
        }
    }
    merged
}

/// Loads a per-machine overrides table from a TOML file.
pub fn load_overrides(path: &Path) -> Result<LauncherTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read overrides file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse overrides file: {}", path.display()))
}

fn sublayer(entries: &[(&str, LauncherAction)]) -> SubLayer {
    entries
        .iter()
        .map(|(key, action)| ((*key).to_string(), action.clone()))
        .collect()
}

/// The common launcher table shared by every machine.
pub fn common_table() -> LauncherTable {
    use LauncherAction as A;
    use Modifier::{Command, Control, Option, RightCommand, RightControl, Shift};

    let mut table = LauncherTable::new();

    // b = "Browse"; empty by default, machines override it
    table.insert("b".to_string(), SubLayer::new());

    // o = "Open" applications
    table.insert(
        "o".to_string(),
        sublayer(&[
            ("b", A::app("Bruno")),
            ("c", A::deeplink("raycast://script-commands/open-calendar")),
            ("f", A::app("Finder")),
            ("i", A::app("IntelliJ IDEA Ultimate")),
            // *l*iterature
            ("l", A::app("Zotero")),
            // *m*arkdown
            ("m", A::app("Obsidian")),
            // *s*hell
            ("s", A::app("Ghostty")),
            ("t", A::app("TickTick")),
            // M*u*sic
            ("u", A::app("Spotify")),
            ("v", A::app("Visual Studio Code")),
            ("w", A::app("Webstorm")),
            ("x", A::app("XCode")),
            ("z", A::app("Zed")),
        ]),
    );

    // n = "New"
    table.insert(
        "n".to_string(),
        sublayer(&[
            // This shortcut is set in TickTick because the default
            // doesn't seem to work anymore.
            ("t", A::key("a", &[Shift, Control, Command, Option])),
            (
                "v",
                A::deeplink("raycast://extensions/thomas/visual-studio-code/index"),
            ),
            (
                "z",
                A::deeplink("raycast://extensions/ewgenius/zed-recent-projects/search"),
            ),
        ]),
    );

    // u = "University"; empty by default
    table.insert("u".to_string(), SubLayer::new());

    // l = "Language"
    table.insert(
        "l".to_string(),
        sublayer(&[
            ("c", A::input_source("zh")),
            ("d", A::input_source("de")),
            ("e", A::input_source("en")),
            ("g", A::input_source("de")),
            ("z", A::input_source("zh")),
        ]),
    );

    // f = "Focus"
    table.insert(
        "f".to_string(),
        sublayer(&[
            (
                "a",
                A::shell("shortcuts run \"Activate Apple Intelligence Focus\""),
            ),
            // *C*lear
            ("c", A::shell("shortcuts run \"Turn off Focus\"")),
            (
                "d",
                A::shell("shortcuts run \"Activate Do Not Disturb Focus\""),
            ),
            // *O*ff
            ("o", A::shell("shortcuts run \"Turn off Focus\"")),
            ("p", A::shell("shortcuts run \"Activate Personal Focus\"")),
            ("s", A::shell("shortcuts run \"Activate Sleep Focus\"")),
            ("t", A::shell("shortcuts run \"Activate Tutorial Focus\"")),
            ("u", A::shell("shortcuts run \"Activate Uni Focus\"")),
            ("w", A::shell("shortcuts run \"Activate Work Focus\"")),
        ]),
    );

    // s = "System"
    table.insert(
        "s".to_string(),
        sublayer(&[
            (
                "c",
                A::deeplink("raycast://extensions/raycast/system/open-camera"),
            ),
            (
                "m",
                A::deeplink("raycast://extensions/Quentin23Soleil/mute-microphone/toggle-mute"),
            ),
            // *A*ll *A*pps
            ("a", A::app("Mission Control")),
            ("u", A::key("volume_increment", &[])),
            ("j", A::key("volume_decrement", &[])),
            ("i", A::key("display_brightness_increment", &[])),
            ("k", A::key("display_brightness_decrement", &[])),
            // l = "Lock"
            ("l", A::key("q", &[RightControl, RightCommand])),
            ("p", A::key("play_or_pause", &[])),
            ("semicolon", A::key("fastforward", &[])),
        ]),
    );

    // v = "moVe" which isn't "m" because we want it on the left hand so
    // that hjkl work like they do in vim
    table.insert(
        "v".to_string(),
        sublayer(&[
            ("h", A::key("left_arrow", &[])),
            ("j", A::key("down_arrow", &[])),
            ("k", A::key("up_arrow", &[])),
            ("l", A::key("right_arrow", &[])),
            ("u", A::key("page_down", &[])),
            ("i", A::key("page_up", &[])),
        ]),
    );

    // m = "Music"
    table.insert(
        "m".to_string(),
        sublayer(&[
            ("p", A::key("play_or_pause", &[])),
            ("n", A::key("fastforward", &[])),
            ("b", A::key("rewind", &[])),
        ]),
    );

    // r = "Raycast"
    table.insert(
        "r".to_string(),
        sublayer(&[
            (
                "a",
                A::deeplink("raycast://extensions/raycast/raycast-ai/ai-chat"),
            ),
            (
                "e",
                A::deeplink("raycast://extensions/raycast/emoji-symbols/search-emoji-symbols"),
            ),
            (
                "f",
                A::deeplink("raycast://extensions/raycast/file-search/search-files"),
            ),
            (
                "g",
                A::deeplink("raycast://extensions/josephschmitt/gif-search/search"),
            ),
            (
                "h",
                A::deeplink("raycast://extensions/raycast/clipboard-history/clipboard-history"),
            ),
            (
                "m",
                A::deeplink("raycast://extensions/raycast/navigation/search-menu-items"),
            ),
            ("p", A::deeplink("raycast://extensions/raycast/raycast/confetti")),
            (
                "t",
                A::deeplink("raycast://extensions/raycast/translator/translate"),
            ),
        ]),
    );

    // w = "Window management"; these mimic vim motions
    table.insert(
        "w".to_string(),
        sublayer(&[
            (
                "h",
                A::deeplink("raycast://extensions/raycast/window-management/left-half"),
            ),
            (
                "j",
                A::deeplink("raycast://extensions/raycast/window-management/bottom-half"),
            ),
            (
                "k",
                A::deeplink("raycast://extensions/raycast/window-management/top-half"),
            ),
            (
                "l",
                A::deeplink("raycast://extensions/raycast/window-management/right-half"),
            ),
            (
                "m",
                A::deeplink("raycast://extensions/raycast/window-management/maximize"),
            ),
            (
                "r",
                A::deeplink("raycast://extensions/raycast/window-management/restore"),
            ),
            (
                "f",
                A::deeplink("raycast://extensions/raycast/window-management/toggle-fullscreen"),
            ),
            (
                "p",
                A::deeplink("raycast://extensions/raycast/window-management/previous-display"),
            ),
            (
                "n",
                A::deeplink("raycast://extensions/raycast/window-management/next-display"),
            ),
        ]),
    );

    table
}
