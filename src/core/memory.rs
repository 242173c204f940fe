//! System memory snapshot
//!
//! Parses the line-oriented `label: value unit` table exposed by the kernel
//! (values already kilobyte-scaled) into a full map. Everything recognized
//! is retained; callers only consume MemTotal, MemAvailable, SwapTotal and
//! SwapFree.

use std::collections::HashMap;

use crate::platform::{SourceError, SystemSource};

/// One full read of the system memory statistics, keyed by label, in kB.
///
/// Rebuilt from scratch on every read; no history is kept across ticks.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    metrics: HashMap<String, u64>,
}

impl MemorySnapshot {
    /// Read a fresh snapshot from the source.
    pub fn read(source: &dyn SystemSource) -> Result<Self, SourceError> {
        Ok(Self::parse(&source.memory_stats()?))
    }

    /// Parse statistics text. Malformed lines are skipped rather than
    /// aborting the whole read.
    pub fn parse(text: &str) -> Self {
        let mut metrics = HashMap::new();
        for line in text.lines() {
            let Some((label, rest)) = line.split_once(':') else {
                continue;
            };
            let Some(value) = rest.split_whitespace().next() else {
                continue;
            };
            if let Ok(kb) = value.parse::<u64>() {
                metrics.insert(label.trim().to_string(), kb);
            }
        }
        Self { metrics }
    }

    /// Look up a metric in kB. An absent label is an error for the caller.
    pub fn metric(&self, name: &str) -> Result<u64, SourceError> {
        self.metrics
            .get(name)
            .copied()
            .ok_or_else(|| SourceError::MissingMetric(name.to_string()))
    }

    /// Percentage of total memory still available.
    pub fn available_percent(&self) -> Result<f64, SourceError> {
        let total = self.metric("MemTotal")?;
        if total == 0 {
            return Err(SourceError::MissingMetric("MemTotal".to_string()));
        }
        Ok(self.metric("MemAvailable")? as f64 / total as f64 * 100.0)
    }

    /// Percentage of swap still free; 0 when the system has no swap.
    pub fn swap_free_percent(&self) -> Result<f64, SourceError> {
        let total = self.metric("SwapTotal")?;
        if total == 0 {
            return Ok(0.0);
        }
        Ok(self.metric("SwapFree")? as f64 / total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "\
MemTotal:        8000000 kB
MemFree:          300000 kB
MemAvailable:     400000 kB
SwapTotal:       2000000 kB
SwapFree:        1500000 kB
line without separator
Odd::
HugePages_Total:       0
";

    #[test]
    fn parses_labels_and_skips_malformed_lines() {
        let snap = MemorySnapshot::parse(MEMINFO);
        assert_eq!(snap.metric("MemTotal").unwrap(), 8_000_000);
        assert_eq!(snap.metric("SwapFree").unwrap(), 1_500_000);
        assert_eq!(snap.metric("HugePages_Total").unwrap(), 0);
        assert!(snap.metric("Odd").is_err());
    }

    #[test]
    fn available_percent_matches_trigger_formula() {
        let snap = MemorySnapshot::parse(MEMINFO);
        assert!((snap.available_percent().unwrap() - 5.0).abs() < 1e-9);
        assert!((snap.swap_free_percent().unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn missing_metric_is_an_error() {
        let snap = MemorySnapshot::parse("MemTotal: 1000 kB\n");
        assert_eq!(
            snap.metric("MemAvailable").unwrap_err(),
            SourceError::MissingMetric("MemAvailable".to_string())
        );
        assert!(snap.available_percent().is_err());
    }

    #[test]
    fn zero_swap_total_reports_zero_percent() {
        let snap = MemorySnapshot::parse("SwapTotal: 0 kB\nSwapFree: 0 kB\n");
        assert_eq!(snap.swap_free_percent().unwrap(), 0.0);
    }

    #[test]
    fn zero_mem_total_is_an_error() {
        let snap = MemorySnapshot::parse("MemTotal: 0 kB\nMemAvailable: 0 kB\n");
        assert!(snap.available_percent().is_err());
    }
}
