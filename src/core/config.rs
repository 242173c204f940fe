//! Configuration for the pressure monitor

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Monitor configuration, immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Available-memory percentage below which a kill cycle runs (0 disables)
    pub threshold_percent: u32,

    /// Subtract a positive oom_score_adj from the badness score
    pub ignore_adj: bool,

    /// Preferred process-name substring to kill first; empty means none
    pub prefer: String,

    /// Compute and report, but never send the kill signal
    pub simulate: bool,

    /// Verbose logging
    pub verbose: bool,

    /// Seconds between sampling ticks
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 0,
            ignore_adj: false,
            prefer: String::new(),
            simulate: false,
            verbose: false,
            interval_secs: 2,
        }
    }
}

impl MonitorConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
