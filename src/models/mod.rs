//! Typed representation of the Karabiner-Elements complex-modifications schema.
//!
//! All types here are immutable value types constructed in one pass and
//! serialized with serde into the document shape Karabiner consumes. The
//! generator never reads runtime state; conditions and `set_variable`
//! effects only *name* variables that the host application owns.

pub mod condition;
pub mod event;
pub mod manipulator;
pub mod profile;

pub use condition::Condition;
pub use event::{
    AnyInput, DelayedAction, FromEvent, FromModifiers, InputSource, Modifier, SetVariable, ToEvent,
};
pub use manipulator::{Manipulator, Parameters};
pub use profile::{ComplexModifications, GlobalSettings, KarabinerConfig, Profile, RuleGroup};
