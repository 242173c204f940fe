//! /proc-backed system source
//!
//! Every read maps straight to a pseudo-file under /proc. A failed read for
//! a specific pid means the process exited between listing and reading,
//! which callers treat as a skip; a failed read of the system-wide table is
//! systemic and ends the sampling cycle.

use std::fs;

use crate::platform::{SourceError, SystemSource};

const PROC_ROOT: &str = "/proc";

/// System source reading the live /proc filesystem.
#[derive(Debug, Default)]
pub struct ProcSource;

impl ProcSource {
    pub fn new() -> Self {
        Self
    }
}

impl SystemSource for ProcSource {
    fn memory_stats(&self) -> Result<String, SourceError> {
        fs::read_to_string(format!("{}/meminfo", PROC_ROOT))
            .map_err(|e| SourceError::Unavailable(e.to_string()))
    }

    fn process_ids(&self) -> Result<Vec<u32>, SourceError> {
        let entries =
            fs::read_dir(PROC_ROOT).map_err(|e| SourceError::Unavailable(e.to_string()))?;

        // Process entries are exactly the numeric directory names
        let mut pids = Vec::new();
        for entry in entries.flatten() {
            if let Ok(pid) = entry.file_name().to_string_lossy().parse::<u32>() {
                pids.push(pid);
            }
        }
        Ok(pids)
    }

    fn process_file(&self, pid: u32, name: &str) -> Result<String, SourceError> {
        // cmdline embeds NUL separators, so read bytes and convert lossily
        fs::read(format!("{}/{}/{}", PROC_ROOT, pid, name))
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|_| SourceError::ProcessVanished(pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn lists_own_process() {
        let source = ProcSource::new();
        let pids = source.process_ids().unwrap();
        assert!(pids.contains(&std::process::id()));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn reads_memory_stats() {
        let source = ProcSource::new();
        let stats = source.memory_stats().unwrap();
        assert!(stats.contains("MemTotal"));
    }

    #[test]
    fn vanished_process_is_reported() {
        let source = ProcSource::new();
        let err = source.process_file(u32::MAX, "status").unwrap_err();
        assert_eq!(err, SourceError::ProcessVanished(u32::MAX));
    }
}
