//! The modal Vim-emulation layer.
//!
//! Models Normal, Visual and the pending Delete/Yank/Change modes as
//! host-persisted boolean variables, with transitions triggered by key
//! events, guards over variable state and frontmost-application identity,
//! and generated side effects. Insert mode is the implicit default. The
//! whole state machine is realized as data the host interprets; nothing
//! here executes at runtime.

pub mod lockdown;
pub mod modes;
pub mod notifications;
pub mod selection;
pub mod tables;
pub mod vars;

pub use modes::{all_groups, expand_motions, ModeContext, FLAG_EXPIRY_MS, NATIVE_VIM_BUNDLES};
pub use selection::{selection_rules, SelectionSpec};
