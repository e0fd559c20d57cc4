//! Application-wide constants.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Hypergen";

/// Default file name for the generated configuration.
pub const DEFAULT_OUTPUT_FILE: &str = "karabiner.json";
