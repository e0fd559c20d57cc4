//! Karabiner key-code knowledge.
//!
//! The generator emits a small, fixed vocabulary of key codes; this module
//! is the authority the validator checks every emitted and matched key
//! code against, so a typo'd key name fails `check` instead of silently
//! becoming a dead rule on the host.

/// Every key code this configuration may match or emit, sorted for binary
/// search.
pub const KNOWN: &[&str] = &[
    "0",
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
    "7",
    "8",
    "9",
    "a",
    "b",
    "c",
    "caps_lock",
    "d",
    "delete_forward",
    "delete_or_backspace",
    "display_brightness_decrement",
    "display_brightness_increment",
    "down_arrow",
    "e",
    "end",
    "escape",
    "f",
    "fastforward",
    "fn",
    "g",
    "h",
    "home",
    "i",
    "j",
    "k",
    "l",
    "left_arrow",
    "left_command",
    "left_control",
    "left_option",
    "left_shift",
    "m",
    "n",
    "o",
    "p",
    "page_down",
    "page_up",
    "play_or_pause",
    "q",
    "r",
    "return_or_enter",
    "rewind",
    "right_arrow",
    "right_command",
    "right_control",
    "right_option",
    "right_shift",
    "s",
    "semicolon",
    "spacebar",
    "t",
    "tab",
    "u",
    "up_arrow",
    "v",
    "volume_decrement",
    "volume_increment",
    "w",
    "x",
    "y",
    "z",
];

/// Keys an engaged Vim mode lets through to the focused application, as
/// self-maps. Everything else is swallowed by the catch-all rule. This
/// allow-list is deliberately explicit configuration data; navigation
/// keys and bare modifiers pass, printable keys do not.
pub const LOCKDOWN_ALLOWED: &[&str] = &[
    "up_arrow",
    "down_arrow",
    "left_arrow",
    "right_arrow",
    "page_up",
    "page_down",
    "home",
    "end",
    "return_or_enter",
    "delete_or_backspace",
    "delete_forward",
    "left_shift",
    "right_shift",
    "left_command",
    "right_command",
    "left_option",
    "right_option",
    "left_control",
    "right_control",
    "fn",
];

/// Checks whether `key_code` is part of the known vocabulary.
pub fn is_known(key_code: &str) -> bool {
    KNOWN.binary_search(&key_code).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_is_sorted() {
        // Binary search relies on sort order.
        for pair in KNOWN.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_is_known() {
        assert!(is_known("left_arrow"));
        assert!(is_known("caps_lock"));
        assert!(is_known("semicolon"));
        assert!(!is_known("left_arow"));
        assert!(!is_known(""));
    }

    #[test]
    fn test_lockdown_allow_list_is_known() {
        for key in LOCKDOWN_ALLOWED {
            assert!(is_known(key), "allow-list entry {key} missing from KNOWN");
        }
    }
}
