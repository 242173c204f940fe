//! memwarden - user-space memory pressure monitor
//!
//! Samples system memory availability on a fixed interval and, when the
//! available percentage drops below a configured threshold, terminates one
//! process owned by the invoking user to relieve pressure. Selection follows
//! the kernel's oom_score heuristic, with an optional preferred-name
//! override.
//!
//! ## Design
//!
//! - **No kernel privileges**: everything is read from the /proc filesystem
//! - **No concurrency**: one blocking sampling cycle per tick
//! - **Racy by nature**: a process that exits mid-read is skipped, never an
//!   error for the whole pass
//! - **Testable**: all OS access goes through the narrow
//!   [`platform::SystemSource`] capability

pub mod core;
pub mod notify;
pub mod platform;

// Re-exports
pub use crate::core::config::MonitorConfig;
pub use crate::core::memory::MemorySnapshot;
pub use crate::core::monitor::PressureMonitor;
pub use crate::core::process::ProcessRecord;
pub use crate::platform::linux::current_uid;
pub use crate::platform::{ProcSource, SourceError, SystemSource};
