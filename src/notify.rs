//! Best-effort desktop notifications
//!
//! Shells out to notify-send; any failure (missing binary, no session bus)
//! is swallowed. A kill announcement must never be blocked by the desktop.

use std::process::Command;

/// Fire-and-forget critical-urgency notification.
pub fn desktop_alert(summary: &str, body: &str) {
    Command::new("notify-send")
        .args(["-u", "critical", "-i", "dialog-warning", summary, body])
        .status()
        .ok();
}
