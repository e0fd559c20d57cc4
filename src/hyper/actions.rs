//! Launcher actions assignable to a sub-layer key.

use serde::{Deserialize, Serialize};

use crate::models::{Modifier, ToEvent};

/// What a launcher key does when pressed inside its sub-layer.
///
/// Also the schema of the per-machine overrides file, hence the serde
/// derives with an explicit `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LauncherAction {
    /// Open an application by name.
    App {
        /// Application name without the `.app` suffix
        name: String,
    },
    /// Open a deeplink URL in the background.
    Deeplink {
        /// The URL, e.g. `raycast://extensions/...`
        url: String,
    },
    /// Run an arbitrary shell command.
    Shell {
        /// The command line
        command: String,
    },
    /// Emit a raw key event.
    Key {
        /// Karabiner key code name
        key_code: String,
        /// Modifiers held for the synthetic event
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modifiers: Vec<Modifier>,
    },
    /// Switch the active input source.
    InputSource {
        /// BCP-47 language tag
        language: String,
    },
}

impl LauncherAction {
    /// Open an application by name.
    pub fn app(name: &str) -> Self {
        Self::App {
            name: name.to_string(),
        }
    }

    /// Open a deeplink URL.
    pub fn deeplink(url: &str) -> Self {
        Self::Deeplink {
            url: url.to_string(),
        }
    }

    /// Run a shell command.
    pub fn shell(command: &str) -> Self {
        Self::Shell {
            command: command.to_string(),
        }
    }

    /// Emit a raw key event.
    pub fn key(key_code: &str, modifiers: &[Modifier]) -> Self {
        Self::Key {
            key_code: key_code.to_string(),
            modifiers: modifiers.to_vec(),
        }
    }

    /// Switch the active input source.
    pub fn input_source(language: &str) -> Self {
        Self::InputSource {
            language: language.to_string(),
        }
    }

    /// Lowers the action to its host effects.
    pub fn to_events(&self) -> Vec<ToEvent> {
        match self {
            Self::App { name } => vec![ToEvent::shell(format!("open -a '{name}.app'"))],
            // -g keeps the deeplink handler from stealing focus.
            Self::Deeplink { url } => vec![ToEvent::shell(format!("open -g \"{url}\""))],
            Self::Shell { command } => vec![ToEvent::shell(command.clone())],
            Self::Key {
                key_code,
                modifiers,
            } => vec![ToEvent::key_with(key_code.clone(), modifiers)],
            Self::InputSource { language } => {
                vec![ToEvent::select_input_source(language.clone())]
            }
        }
    }
}
