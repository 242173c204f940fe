//! The pressure monitor
//!
//! One `tick` is one full cycle: refresh the memory snapshot, report it to
//! the display sink, and when availability drops under the threshold run
//! the kill pipeline exactly once. The monitor owns its configuration and
//! source for the whole daemon lifetime; snapshots and candidate lists live
//! for a single tick only.

use std::io::Write;

use chrono::Local;
use tracing::debug;

use crate::core::config::MonitorConfig;
use crate::core::memory::MemorySnapshot;
use crate::core::process::{self, ProcessRecord};
use crate::core::selector;
use crate::notify;
use crate::platform::{SourceError, SystemSource};

/// Sampling-and-decision engine driven by an external tick.
pub struct PressureMonitor<S> {
    config: MonitorConfig,
    source: S,
    uid: u32,
}

impl<S: SystemSource> PressureMonitor<S> {
    pub fn new(config: MonitorConfig, source: S, uid: u32) -> Self {
        Self { config, source, uid }
    }

    /// Run one full sampling cycle, writing status lines to `out`.
    ///
    /// A systemic read failure ends this cycle only; the caller is expected
    /// to log it and try again on the next tick. Sink write failures are
    /// ignored: the display is best-effort.
    pub fn tick<W: Write>(&self, out: &mut W) -> Result<(), SourceError> {
        let snapshot = MemorySnapshot::read(&self.source)?;
        self.print_header(out);
        self.print_memory(out, &snapshot)?;

        let available = snapshot.available_percent()?;
        if (available.floor() as i64) < i64::from(self.config.threshold_percent) {
            self.relieve_pressure(out)?;
        }
        Ok(())
    }

    fn print_header<W: Write>(&self, out: &mut W) {
        writeln!(
            out,
            "Memory threshold: {}%  Ignoring adj: {}   Simulating: {}  Verbose: {}",
            self.config.threshold_percent,
            self.config.ignore_adj,
            self.config.simulate,
            self.config.verbose
        )
        .ok();
    }

    fn print_memory<W: Write>(
        &self,
        out: &mut W,
        snapshot: &MemorySnapshot,
    ) -> Result<(), SourceError> {
        let avail = snapshot.metric("MemAvailable")?;
        let total = snapshot.metric("MemTotal")?;
        let swap_free = snapshot.metric("SwapFree")?;
        let swap_total = snapshot.metric("SwapTotal")?;
        writeln!(
            out,
            "{} mem avail: {} of {} Mib ({:2.0}%), swap free: {} of {} Mib ({:2.0}%)",
            Local::now().format("%H:%M:%S"),
            avail / 1000,
            total / 1000,
            snapshot.available_percent()?,
            swap_free / 1000,
            swap_total / 1000,
            snapshot.swap_free_percent()?,
        )
        .ok();
        Ok(())
    }

    /// The kill pipeline: enumerate, rank, select, execute, announce.
    fn relieve_pressure<W: Write>(&self, out: &mut W) -> Result<(), SourceError> {
        writeln!(out, "ready to kill!").ok();
        let ranked =
            process::ranked_candidates(&self.source, self.uid, self.config.ignore_adj)?;

        if !self.config.prefer.is_empty() {
            writeln!(out, "trying to kill preferred").ok();
            if let Some(target) = selector::preferred(&ranked, &self.config.prefer) {
                writeln!(out, "found process {} with pid {}", target.name, target.pid).ok();
                self.kill_and_announce(out, target);
                return Ok(());
            }
            writeln!(out, "preferred not found").ok();
        }

        writeln!(out, "going for the first of list").ok();
        match selector::top(&ranked) {
            Some(target) => {
                writeln!(out, "process {} with pid {}", target.name, target.pid).ok();
                self.kill_and_announce(out, target);
            }
            None => {
                // Every candidate vanished mid-pass; nothing to do this cycle
                writeln!(out, "no candidates left").ok();
                debug!("kill cycle ended with no candidates");
            }
        }
        Ok(())
    }

    fn kill_and_announce<W: Write>(&self, out: &mut W, target: &ProcessRecord) {
        let outcome = selector::execute(target, self.config.simulate);
        let message = format!("killed process {} with pid {}", outcome.name, outcome.pid);
        writeln!(out, "{}", message).ok();
        notify::desktop_alert("OOM", &message);
    }
}
