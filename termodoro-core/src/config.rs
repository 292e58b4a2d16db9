use crate::error::ConfigError;
use crate::phase::Phase;
use serde::Deserialize;

/// Interval lengths, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub work_seconds: u64,
    pub short_break_seconds: u64,
    pub long_break_seconds: u64,
    /// Completed work rounds allowed in a cycle before the long break.
    pub rounds_per_cycle: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
            rounds_per_cycle: 4,
        }
    }
}

impl TimerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("work_seconds", self.work_seconds),
            ("short_break_seconds", self.short_break_seconds),
            ("long_break_seconds", self.long_break_seconds),
            ("rounds_per_cycle", u64::from(self.rounds_per_cycle)),
        ];
        match fields.into_iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::Zero { field }),
            None => Ok(()),
        }
    }

    /// Duration of `phase` in seconds.
    pub fn target_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::ShortBreak => self.short_break_seconds,
            Phase::LongBreak => self.long_break_seconds,
        }
    }
}
