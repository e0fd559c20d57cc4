//! From-events (what the manipulator matches) and to-events (what it emits).

use serde::{Deserialize, Serialize};

/// Keyboard modifier names understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Either shift key
    Shift,
    /// Either option key
    Option,
    /// Either command key
    Command,
    /// Either control key
    Control,
    /// The fn key
    Fn,
    /// Left shift
    LeftShift,
    /// Left option
    LeftOption,
    /// Left command
    LeftCommand,
    /// Left control
    LeftControl,
    /// Right shift
    RightShift,
    /// Right option
    RightOption,
    /// Right command
    RightCommand,
    /// Right control
    RightControl,
    /// Wildcard accepted in `optional` modifier lists
    Any,
}

/// Modifier constraint on a from-event.
///
/// `mandatory` modifiers must be held for the rule to match; `optional`
/// modifiers may be held without preventing the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FromModifiers {
    /// Modifiers that must be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<Modifier>,
    /// Modifiers that may be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<Modifier>,
}

impl FromModifiers {
    /// Constraint requiring all of `modifiers` to be held.
    pub fn mandatory(modifiers: &[Modifier]) -> Self {
        Self {
            mandatory: modifiers.to_vec(),
            optional: Vec::new(),
        }
    }

    /// Constraint permitting any of `modifiers` to be held.
    pub fn optional(modifiers: &[Modifier]) -> Self {
        Self {
            mandatory: Vec::new(),
            optional: modifiers.to_vec(),
        }
    }
}

/// Wildcard input classes for catch-all from-events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyInput {
    /// Any keyboard key
    KeyCode,
    /// Any pointing device button
    PointingButton,
}

/// The input event a manipulator matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FromEvent {
    /// A concrete key, with an optional modifier constraint.
    Key {
        /// Karabiner key code name (e.g. `left_arrow`)
        key_code: String,
        /// Modifier constraint, absent meaning "no modifiers held"
        #[serde(skip_serializing_if = "Option::is_none")]
        modifiers: Option<FromModifiers>,
    },
    /// Catch-all over an input class (serializes as `{"any": "key_code"}`).
    Any {
        /// The matched input class
        any: AnyInput,
    },
}

impl FromEvent {
    /// From-event matching `key_code` pressed without modifiers.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self::Key {
            key_code: key_code.into(),
            modifiers: None,
        }
    }

    /// From-event matching `key_code` under a modifier constraint.
    pub fn key_with(key_code: impl Into<String>, modifiers: FromModifiers) -> Self {
        Self::Key {
            key_code: key_code.into(),
            modifiers: Some(modifiers),
        }
    }

    /// Catch-all from-event matching every keyboard key.
    pub fn any_key() -> Self {
        Self::Any {
            any: AnyInput::KeyCode,
        }
    }

    /// The concrete key code this event matches, if not a catch-all.
    pub fn key_code(&self) -> Option<&str> {
        match self {
            Self::Key { key_code, .. } => Some(key_code),
            Self::Any { .. } => None,
        }
    }
}

/// Payload of a `set_variable` to-event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVariable {
    /// Host-side variable name
    pub name: String,
    /// New value (0 or 1 in this configuration)
    pub value: u8,
}

/// Payload of a `select_input_source` to-event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    /// BCP-47 language tag (e.g. "en", "de")
    pub language: String,
}

/// A side effect the host executes when a manipulator fires.
///
/// Effects in a manipulator's `to` list run in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToEvent {
    /// Emit a synthetic key event.
    Key {
        /// Karabiner key code name
        key_code: String,
        /// Modifiers held for this synthetic event
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modifiers: Vec<Modifier>,
    },
    /// Write a host-persisted variable.
    SetVariable {
        /// The variable write
        set_variable: SetVariable,
    },
    /// Run a shell command.
    Shell {
        /// The command line, executed by the host
        shell_command: String,
    },
    /// Switch the active input source.
    SelectInputSource {
        /// Input source selector
        select_input_source: InputSource,
    },
}

impl ToEvent {
    /// Synthetic key event without modifiers.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self::Key {
            key_code: key_code.into(),
            modifiers: Vec::new(),
        }
    }

    /// Synthetic key event with modifiers.
    pub fn key_with(key_code: impl Into<String>, modifiers: &[Modifier]) -> Self {
        Self::Key {
            key_code: key_code.into(),
            modifiers: modifiers.to_vec(),
        }
    }

    /// Set the named variable to 1.
    pub fn activate(name: impl Into<String>) -> Self {
        Self::SetVariable {
            set_variable: SetVariable {
                name: name.into(),
                value: 1,
            },
        }
    }

    /// Set the named variable to 0.
    pub fn deactivate(name: impl Into<String>) -> Self {
        Self::SetVariable {
            set_variable: SetVariable {
                name: name.into(),
                value: 0,
            },
        }
    }

    /// Run a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell {
            shell_command: command.into(),
        }
    }

    /// Post an on-screen notification via `osascript`.
    pub fn notify(title: &str, body: Option<&str>) -> Self {
        let command = match body {
            Some(body) => format!(
                "osascript -e 'display notification \"{body}\" with title \"{title}\"'"
            ),
            None => format!("osascript -e 'display notification with title \"{title}\"'"),
        };
        Self::shell(command)
    }

    /// Switch the active input source to `language`.
    pub fn select_input_source(language: impl Into<String>) -> Self {
        Self::SelectInputSource {
            select_input_source: InputSource {
                language: language.into(),
            },
        }
    }

    /// Copy of this event with shift added to the emitted key, turning a
    /// plain cursor move into a selection-extending move. Non-key effects
    /// are returned unchanged.
    pub fn with_shift(&self) -> Self {
        match self {
            Self::Key {
                key_code,
                modifiers,
            } => {
                let mut modifiers = modifiers.clone();
                if !modifiers.contains(&Modifier::Shift) {
                    modifiers.push(Modifier::Shift);
                }
                Self::Key {
                    key_code: key_code.clone(),
                    modifiers,
                }
            }
            other => other.clone(),
        }
    }

    /// The key code this event emits, if it is a key event.
    pub fn key_code(&self) -> Option<&str> {
        match self {
            Self::Key { key_code, .. } => Some(key_code),
            _ => None,
        }
    }

    /// The variable name this event writes, if it is a variable write.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::SetVariable { set_variable } => Some(&set_variable.name),
            _ => None,
        }
    }
}

/// Effects the host runs when a delayed action resolves.
///
/// Used for the transient g-pressed flag: the flag is cleared either when
/// the timeout expires or when another key interrupts the wait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DelayedAction {
    /// Effects run when the delay elapses without interruption
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_if_invoked: Vec<ToEvent>,
    /// Effects run when another key event arrives first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_if_canceled: Vec<ToEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_event_serialization() {
        let event = ToEvent::key_with("left_arrow", &[Modifier::Option, Modifier::Shift]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key_code": "left_arrow", "modifiers": ["option", "shift"]})
        );
    }

    #[test]
    fn test_bare_key_omits_modifiers() {
        let json = serde_json::to_value(ToEvent::key("escape")).unwrap();
        assert_eq!(json, serde_json::json!({"key_code": "escape"}));
    }

    #[test]
    fn test_set_variable_serialization() {
        let json = serde_json::to_value(ToEvent::activate("vim_mode")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"set_variable": {"name": "vim_mode", "value": 1}})
        );
    }

    #[test]
    fn test_any_key_from_event() {
        let json = serde_json::to_value(FromEvent::any_key()).unwrap();
        assert_eq!(json, serde_json::json!({"any": "key_code"}));
    }

    #[test]
    fn test_notify_with_body() {
        let event = ToEvent::notify("-- NORMAL --", Some("Press [i] to enter Insert Mode"));
        let ToEvent::Shell { shell_command } = event else {
            panic!("notify should produce a shell command");
        };
        assert_eq!(
            shell_command,
            "osascript -e 'display notification \"Press [i] to enter Insert Mode\" with title \"-- NORMAL --\"'"
        );
    }

    #[test]
    fn test_notify_without_body() {
        let event = ToEvent::notify("-- INSERT --", None);
        let ToEvent::Shell { shell_command } = event else {
            panic!("notify should produce a shell command");
        };
        assert_eq!(
            shell_command,
            "osascript -e 'display notification with title \"-- INSERT --\"'"
        );
    }

    #[test]
    fn test_with_shift_adds_shift_once() {
        let plain = ToEvent::key("left_arrow");
        let shifted = plain.with_shift();
        assert_eq!(shifted, ToEvent::key_with("left_arrow", &[Modifier::Shift]));
        // Already-shifted events are unchanged
        assert_eq!(shifted.with_shift(), shifted);
    }

    #[test]
    fn test_with_shift_leaves_non_key_effects_alone() {
        let effect = ToEvent::activate("vim_mode");
        assert_eq!(effect.with_shift(), effect);
    }
}
