//! The manipulator (rule) type and its builder.

use serde::{Deserialize, Serialize};

use crate::models::condition::Condition;
use crate::models::event::{DelayedAction, FromEvent, ToEvent};

/// Per-manipulator host parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Parameters {
    /// Delay before `to_delayed_action.to_if_invoked` fires, in milliseconds
    #[serde(
        rename = "basic.to_delayed_action_delay_milliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_delayed_action_delay_milliseconds: Option<u32>,
}

/// One remapping rule in the host's manipulator schema.
///
/// Immutable once built; the full rule list is regenerated on every run,
/// so there is no identity persisted across builds. The host evaluates
/// rules top to bottom and takes the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Always "basic" for complex modifications
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description shown in the host UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The matched input event
    pub from: FromEvent,
    /// Conjunctive guard conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// Ordered effects run on key-down
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<ToEvent>,
    /// Effects run if the key is pressed and released alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_if_alone: Option<Vec<ToEvent>>,
    /// Effects run on key-up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_after_key_up: Option<Vec<ToEvent>>,
    /// Host-native delayed action (timeout vs. interruption)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_delayed_action: Option<DelayedAction>,
    /// Host parameters, only emitted when a delayed action needs a delay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl Manipulator {
    /// Creates a basic manipulator matching `from`, with no effects yet.
    pub fn basic(from: FromEvent) -> Self {
        Self {
            kind: "basic".to_string(),
            description: None,
            from,
            conditions: Vec::new(),
            to: Vec::new(),
            to_if_alone: None,
            to_after_key_up: None,
            to_delayed_action: None,
            parameters: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a guard condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Appends several guard conditions.
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Sets the ordered key-down effects.
    pub fn with_to(mut self, to: Vec<ToEvent>) -> Self {
        self.to = to;
        self
    }

    /// Sets the tapped-alone effects.
    pub fn with_to_if_alone(mut self, to: Vec<ToEvent>) -> Self {
        self.to_if_alone = Some(to);
        self
    }

    /// Sets the key-up effects.
    pub fn with_to_after_key_up(mut self, to: Vec<ToEvent>) -> Self {
        self.to_after_key_up = Some(to);
        self
    }

    /// Sets a delayed action together with its delay parameter.
    pub fn with_delayed_action(mut self, action: DelayedAction, delay_ms: u32) -> Self {
        self.to_delayed_action = Some(action);
        self.parameters = Some(Parameters {
            to_delayed_action_delay_milliseconds: Some(delay_ms),
        });
        self
    }
}
