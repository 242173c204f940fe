//! Linux platform support
//!
//! The /proc-backed implementation of the system source, plus the uid
//! lookup for ownership checks.

pub mod proc;

pub use proc::ProcSource;

/// Numeric id of the invoking user.
pub fn current_uid() -> u32 {
    // SAFETY: getuid never fails and has no preconditions
    unsafe { libc::getuid() }
}
