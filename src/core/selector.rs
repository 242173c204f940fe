//! Termination target selection and execution
//!
//! Policy: a configured preferred-name substring wins over rank; otherwise
//! the top-ranked candidate is taken. The kill signal is unconditional
//! (SIGKILL) and fire-and-forget; under simulate mode the signal is the
//! only thing suppressed.

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing::{info, warn};

use crate::core::process::ProcessRecord;

/// What the executor did for one selected process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillOutcome {
    pub pid: u32,
    pub name: String,
    /// False when simulate mode suppressed the signal
    pub signalled: bool,
}

/// First candidate, in rank order, whose name contains `prefer`
/// (case-sensitive substring match).
pub fn preferred<'a>(ranked: &'a [ProcessRecord], prefer: &str) -> Option<&'a ProcessRecord> {
    ranked.iter().find(|record| record.name.contains(prefer))
}

/// Top-ranked candidate, if any remain.
pub fn top(ranked: &[ProcessRecord]) -> Option<&ProcessRecord> {
    ranked.first()
}

/// Deliver SIGKILL to the selected process unless simulating. Delivery is
/// fire-and-forget: a target that exited first is logged, never an error;
/// its effect shows up on the next memory read.
pub fn execute(target: &ProcessRecord, simulate: bool) -> KillOutcome {
    if simulate {
        info!("simulate: would kill {} (pid {})", target.name, target.pid);
        return KillOutcome {
            pid: target.pid,
            name: target.name.clone(),
            signalled: false,
        };
    }

    match signal::kill(Pid::from_raw(target.pid as i32), Signal::SIGKILL) {
        Ok(()) => info!("sent SIGKILL to {} (pid {})", target.name, target.pid),
        Err(errno) => warn!("kill {} failed: {}", target.pid, errno),
    }

    KillOutcome {
        pid: target.pid,
        name: target.name.clone(),
        signalled: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, name: &str, badness: i64) -> ProcessRecord {
        ProcessRecord {
            pid,
            name: name.to_string(),
            resident_kb: 1000,
            badness,
        }
    }

    #[test]
    fn preferred_substring_wins_over_rank() {
        let ranked = vec![record(2, "firefox", 900), record(1, "chrome", 500)];
        assert_eq!(preferred(&ranked, "chrome").unwrap().pid, 1);
    }

    #[test]
    fn preferred_match_is_case_sensitive() {
        let ranked = vec![record(1, "Chrome", 500)];
        assert!(preferred(&ranked, "chrome").is_none());
    }

    #[test]
    fn preferred_takes_first_in_rank_order() {
        let ranked = vec![
            record(2, "chrome --type=gpu", 900),
            record(1, "chrome", 500),
        ];
        assert_eq!(preferred(&ranked, "chrome").unwrap().pid, 2);
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(top(&[]).is_none());
        assert!(preferred(&[], "anything").is_none());
    }

    #[test]
    fn simulate_never_signals() {
        let outcome = execute(&record(99_999_999, "doomed", 1), true);
        assert!(!outcome.signalled);
        assert_eq!(outcome.pid, 99_999_999);
        assert_eq!(outcome.name, "doomed");
    }
}
