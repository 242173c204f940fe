//! Candidate process enumeration and scoring
//!
//! One fused pass per process id: ownership check, resident memory, badness
//! and display name all come from the same read sequence, and a process that
//! disappears at any sub-step is dropped from the result rather than
//! retried. Process lists are inherently racy snapshots; skipping is the
//! normal case, not an error.

use tracing::debug;

use crate::platform::{SourceError, SystemSource};

/// One candidate for termination, sampled at enumeration time.
///
/// No identity persists across cycles; the same pid sampled twice is two
/// independent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Process id, live at sampling time
    pub pid: u32,
    /// Command line with NUL separators stripped; empty when unavailable
    pub name: String,
    /// Resident set size in kB
    pub resident_kb: u64,
    /// Kernel badness heuristic, higher means more eligible for termination
    pub badness: i64,
}

/// Enumerate processes owned by `uid`, scored and ranked by descending
/// badness. Vanished processes are skipped; the pass never fails as a whole
/// unless the process listing itself is unreadable.
pub fn ranked_candidates(
    source: &dyn SystemSource,
    uid: u32,
    ignore_adj: bool,
) -> Result<Vec<ProcessRecord>, SourceError> {
    let mut records = Vec::new();
    for pid in source.process_ids()? {
        match read_record(source, pid, uid, ignore_adj) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {} // owned by someone else
            Err(err) => debug!("skipping {}: {}", pid, err),
        }
    }
    rank(&mut records);
    Ok(records)
}

/// Sort by descending badness. Order among equal scores is unspecified; the
/// selector takes the first.
pub fn rank(records: &mut [ProcessRecord]) {
    records.sort_by(|a, b| b.badness.cmp(&a.badness));
}

/// Read and score a single process. `Ok(None)` means the process belongs to
/// another user; any missing or unreadable field means it vanished mid-pass.
fn read_record(
    source: &dyn SystemSource,
    pid: u32,
    uid: u32,
    ignore_adj: bool,
) -> Result<Option<ProcessRecord>, SourceError> {
    let status = source.process_file(pid, "status")?;

    let owner: u32 =
        status_field(&status, "Uid:", 1).ok_or(SourceError::ProcessVanished(pid))?;
    if owner != uid {
        return Ok(None);
    }

    // Kernel threads carry no VmRSS line and drop out here
    let resident_kb: u64 =
        status_field(&status, "VmRSS:", 1).ok_or(SourceError::ProcessVanished(pid))?;

    let mut badness: i64 = parse_scalar(&source.process_file(pid, "oom_score")?)
        .ok_or(SourceError::ProcessVanished(pid))?;

    if ignore_adj {
        let adj: i64 = parse_scalar(&source.process_file(pid, "oom_score_adj")?)
            .ok_or(SourceError::ProcessVanished(pid))?;
        if adj > 0 {
            badness -= adj;
        }
    }

    // Arguments are NUL-separated; dropping the separators loses the
    // boundaries, which is acceptable for display
    let name = source.process_file(pid, "cmdline")?.replace('\0', "");

    Ok(Some(ProcessRecord {
        pid,
        name,
        resident_kb,
        badness,
    }))
}

/// Whitespace-separated field `index` of the first line starting with
/// `label`, parsed.
fn status_field<T: std::str::FromStr>(text: &str, label: &str, index: usize) -> Option<T> {
    text.lines()
        .find(|line| line.starts_with(label))?
        .split_whitespace()
        .nth(index)?
        .parse()
        .ok()
}

/// Single-value pseudo-file contents, parsed.
fn parse_scalar<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakeSource;

    const UID: u32 = 1000;

    #[test]
    fn filters_by_owner_and_ranks_by_badness() {
        let mut source = FakeSource::new("unused");
        source.add_scored(101, UID, 50_000, 500, 0, "chrome\0");
        source.add_scored(202, UID, 90_000, 900, 0, "firefox\0");
        source.add_scored(303, 0, 10_000, 999, 0, "rootd\0");

        let ranked = ranked_candidates(&source, UID, false).unwrap();
        let pids: Vec<u32> = ranked.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![202, 101]);
        assert_eq!(ranked[0].badness, 900);
        assert_eq!(ranked[0].resident_kb, 90_000);
        assert_eq!(ranked[0].name, "firefox");
    }

    #[test]
    fn vanished_process_is_skipped_not_fatal() {
        let mut source = FakeSource::new("unused");
        source.add_scored(10, UID, 100, 50, 0, "alive\0");
        source.add_vanished(11);

        let ranked = ranked_candidates(&source, UID, false).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].pid, 10);
    }

    #[test]
    fn positive_adj_subtracted_only_when_enabled() {
        let mut source = FakeSource::new("unused");
        source.add_scored(10, UID, 100, 700, 300, "victim\0");

        let plain = ranked_candidates(&source, UID, false).unwrap();
        assert_eq!(plain[0].badness, 700);

        let adjusted = ranked_candidates(&source, UID, true).unwrap();
        assert_eq!(adjusted[0].badness, 400);
    }

    #[test]
    fn negative_adj_never_increases_badness() {
        let mut source = FakeSource::new("unused");
        source.add_scored(10, UID, 100, 700, -500, "shielded\0");

        let ranked = ranked_candidates(&source, UID, true).unwrap();
        assert_eq!(ranked[0].badness, 700);
    }

    #[test]
    fn cmdline_nul_separators_are_stripped() {
        let mut source = FakeSource::new("unused");
        source.add_scored(10, UID, 100, 1, 0, "/usr/bin/python\0script.py\0");

        let ranked = ranked_candidates(&source, UID, false).unwrap();
        assert_eq!(ranked[0].name, "/usr/bin/pythonscript.py");
    }

    #[test]
    fn process_without_vmrss_is_skipped() {
        let mut source = FakeSource::new("unused");
        source.add_process(
            2,
            &[
                ("status", "Name:\tkthread\nUid:\t1000\t1000\t1000\t1000\n"),
                ("oom_score", "0\n"),
            ],
        );

        assert!(ranked_candidates(&source, UID, false).unwrap().is_empty());
    }

    #[test]
    fn rank_is_non_increasing() {
        let mut records: Vec<ProcessRecord> = [3, 900, 7, 500, 900]
            .iter()
            .enumerate()
            .map(|(i, &badness)| ProcessRecord {
                pid: i as u32 + 1,
                name: String::new(),
                resident_kb: 0,
                badness,
            })
            .collect();

        rank(&mut records);
        for pair in records.windows(2) {
            assert!(pair[0].badness >= pair[1].badness);
        }
    }
}
