use std::path::Path;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

use crate::tasks::presenter::DEFAULT_POLL;

/// Longest presenter poll that still keeps shutdown within one wait cycle.
const MAX_PRESENTER_POLL: Duration = Duration::from_secs(1);

/// Runtime knobs for the simulation binary.
///
/// Phase dwell times are fixed by [`crate::phase::Phase`] and intentionally
/// not configurable here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RuntimeOptions {
    /// Pause between the banner and the first phase.
    #[serde(with = "humantime_serde")]
    pub startup_delay: Duration,
    /// How long the presenter waits for a change event before re-reading.
    #[serde(with = "humantime_serde")]
    pub presenter_poll: Duration,
    /// Clear the terminal before drawing each phase.
    pub clear_screen: bool,
}

impl RuntimeOptions {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate invariants that serde defaults cannot express.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.presenter_poll.is_zero(),
            "presenter-poll must be greater than zero"
        );
        ensure!(
            self.presenter_poll <= MAX_PRESENTER_POLL,
            "presenter-poll must not exceed {}",
            humantime::format_duration(MAX_PRESENTER_POLL)
        );
        Ok(self)
    }
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_secs(2),
            presenter_poll: DEFAULT_POLL,
            clear_screen: true,
        }
    }
}
