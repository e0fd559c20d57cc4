//! Hypergen
//!
//! Generates a Karabiner-Elements `karabiner.json` with two layers on top of
//! an ordinary macOS keyboard: a Hyper Key launcher (Caps Lock held) with
//! mnemonic sub-layers, and a modal Vim editing mode driven entirely by
//! Karabiner variables and declarative rules.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod document;
pub mod hyper;
pub mod keycodes;
pub mod models;
pub mod validator;
pub mod vim;
