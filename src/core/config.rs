//! Tunables for the simulated run. Defaults reproduce the reference demo.

use core::time::Duration;

pub const DEFAULT_TICK_PERIOD_MS: u64 = 600;
pub const DEFAULT_TOTAL_EPOCHS: u32 = 10;
pub const DEFAULT_PROGRESS_STEP: u8 = 10;
pub const DEFAULT_SEED: u64 = 0xC0FF_EE12;
/// Upper bound on `total_epochs`; larger runs are cut to this length.
pub const MAX_TOTAL_EPOCHS: u32 = 10_000;

fn default_tick_period_ms() -> u64 {
    DEFAULT_TICK_PERIOD_MS
}

fn default_total_epochs() -> u32 {
    DEFAULT_TOTAL_EPOCHS
}

fn default_progress_step() -> u8 {
    DEFAULT_PROGRESS_STEP
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoConfig {
    /// Period of the recurring training tick.
    #[cfg_attr(feature = "serde", serde(default = "default_tick_period_ms"))]
    pub tick_period_ms: u64,
    /// Epoch on which the run completes.
    #[cfg_attr(feature = "serde", serde(default = "default_total_epochs"))]
    pub total_epochs: u32,
    /// Percentage points added to the progress bar per tick (capped at 100).
    #[cfg_attr(feature = "serde", serde(default = "default_progress_step"))]
    pub progress_step: u8,
    /// Seed for the reconstruction-error draws.
    #[cfg_attr(feature = "serde", serde(default = "default_seed"))]
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: default_tick_period_ms(),
            total_epochs: default_total_epochs(),
            progress_step: default_progress_step(),
            seed: default_seed(),
        }
    }
}

impl DemoConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }

    /// Clamp values that would stall or never finish a run.
    pub fn sanitized(mut self) -> Self {
        self.tick_period_ms = self.tick_period_ms.max(1);
        self.total_epochs = self.total_epochs.clamp(1, MAX_TOTAL_EPOCHS);
        self.progress_step = self.progress_step.clamp(1, 100);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let c = DemoConfig::default();
        assert_eq!(c.tick_period(), Duration::from_millis(600));
        assert_eq!(c.total_epochs, 10);
        assert_eq!(c.progress_step, 10);
    }

    #[test]
    fn sanitized_clamps_degenerate_values() {
        let c = DemoConfig {
            tick_period_ms: 0,
            total_epochs: 0,
            progress_step: 250,
            seed: 1,
        }
        .sanitized();
        assert_eq!(c.tick_period_ms, 1);
        assert_eq!(c.total_epochs, 1);
        assert_eq!(c.progress_step, 100);
    }

    #[test]
    fn sanitized_caps_run_length() {
        let c = DemoConfig {
            total_epochs: u32::MAX,
            ..DemoConfig::default()
        }
        .sanitized();
        assert_eq!(c.total_epochs, MAX_TOTAL_EPOCHS);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: DemoConfig = serde_json::from_str(r#"{"tick_period_ms": 50}"#).unwrap();
        assert_eq!(c.tick_period_ms, 50);
        assert_eq!(c.total_epochs, DEFAULT_TOTAL_EPOCHS);
        assert_eq!(c.seed, DEFAULT_SEED);
    }
}
