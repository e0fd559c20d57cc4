//! On-screen notifications announcing mode changes.

use crate::models::ToEvent;

/// Notification shown when Normal mode engages.
pub fn notify_normal_mode() -> ToEvent {
    ToEvent::notify("-- NORMAL --", Some("Press [i] to enter Insert Mode"))
}

/// Notification shown when returning to Insert mode.
pub fn notify_insert_mode() -> ToEvent {
    ToEvent::notify("-- INSERT --", None)
}

/// Notification shown when Visual mode engages.
pub fn notify_visual_mode() -> ToEvent {
    ToEvent::notify("-- VISUAL --", Some("Press [v] again to go back to Vim Mode"))
}
