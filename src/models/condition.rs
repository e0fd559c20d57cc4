//! Guard conditions gating whether a manipulator is eligible to fire.
//!
//! The host evaluates a manipulator's condition list as a conjunction, so
//! composition is plain list concatenation.

use serde::{Deserialize, Serialize};

/// A single guard condition over host-persisted variable state or the
/// frontmost application's bundle identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Fires only while the named variable equals `value`.
    VariableIf {
        /// Host-side variable name
        name: String,
        /// Required value (0 or 1 in this configuration)
        value: u8,
    },
    /// Fires only while the named variable does not equal `value`.
    VariableUnless {
        /// Host-side variable name
        name: String,
        /// Excluded value (0 or 1 in this configuration)
        value: u8,
    },
    /// Fires only while the frontmost application is one of the listed bundles.
    FrontmostApplicationIf {
        /// Application bundle identifiers
        bundle_identifiers: Vec<String>,
    },
    /// Fires only while the frontmost application is none of the listed bundles.
    FrontmostApplicationUnless {
        /// Application bundle identifiers
        bundle_identifiers: Vec<String>,
    },
}

impl Condition {
    /// Guard requiring the named variable to be 1.
    pub fn is_active(name: impl Into<String>) -> Self {
        Self::VariableIf {
            name: name.into(),
            value: 1,
        }
    }

    /// Guard requiring the named variable to not be 1.
    ///
    /// Variables absent on the host side are falsy, so this also matches
    /// variables that were never set.
    pub fn not_active(name: impl Into<String>) -> Self {
        Self::VariableUnless {
            name: name.into(),
            value: 1,
        }
    }

    /// Guard requiring the frontmost application to be in `bundle_ids`.
    pub fn frontmost_in(bundle_ids: &[&str]) -> Self {
        Self::FrontmostApplicationIf {
            bundle_identifiers: bundle_ids.iter().map(ToString::to_string).collect(),
        }
    }

    /// Guard requiring the frontmost application to not be in `bundle_ids`.
    pub fn frontmost_unless(bundle_ids: &[&str]) -> Self {
        Self::FrontmostApplicationUnless {
            bundle_identifiers: bundle_ids.iter().map(ToString::to_string).collect(),
        }
    }

    /// The variable name this condition reads, if it is a variable guard.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::VariableIf { name, .. } | Self::VariableUnless { name, .. } => Some(name),
            _ => None,
        }
    }
}
