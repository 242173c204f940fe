//! Platform abstraction for system state access
//!
//! The monitor never touches the operating system directly: everything it
//! needs comes through the narrow [`SystemSource`] capability, so tests can
//! substitute synthetic /proc-style text for the real filesystem.

pub mod linux;

pub use linux::ProcSource;

/// Errors produced while reading system or process state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The system-wide statistics source could not be read
    Unavailable(String),
    /// A process disappeared between being listed and being read
    ProcessVanished(u32),
    /// A metric the caller depends on was absent from the snapshot
    MissingMetric(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Unavailable(msg) => {
                write!(f, "system statistics unavailable: {}", msg)
            }
            SourceError::ProcessVanished(pid) => write!(f, "process {} has gone away", pid),
            SourceError::MissingMetric(name) => {
                write!(f, "metric {} missing from snapshot", name)
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Narrow system-information capability.
///
/// One production implementation ([`ProcSource`]) reads the live /proc
/// filesystem; test doubles serve fixture text instead.
pub trait SystemSource {
    /// Raw text of the system-wide memory statistics table.
    fn memory_stats(&self) -> Result<String, SourceError>;

    /// Ids of all currently visible processes.
    fn process_ids(&self) -> Result<Vec<u32>, SourceError>;

    /// Raw contents of a per-process pseudo-file such as `status`,
    /// `oom_score` or `cmdline`. Any failure means the process is gone.
    fn process_file(&self, pid: u32, name: &str) -> Result<String, SourceError>;
}
