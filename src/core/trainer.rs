//! Simulated trainer.
//!
//! There is no model here. Each tick advances an epoch counter and appends a
//! loss pair computed from fixed formulas of the epoch number.

use tracing::{debug, info};

use crate::config::{DemoConfig, MAX_TOTAL_EPOCHS};

pub const TRAIN_LOSS_FLOOR: f32 = 0.02;
pub const VAL_LOSS_FLOOR: f32 = 0.03;

/// Synthetic training loss for a 1-based epoch: `max(0.02, 0.5 / epoch)`.
pub fn train_loss(epoch: u32) -> f32 {
    (0.5 / epoch.max(1) as f32).max(TRAIN_LOSS_FLOOR)
}

/// Synthetic validation loss for a 1-based epoch: `max(0.03, 0.6 / epoch)`.
pub fn val_loss(epoch: u32) -> f32 {
    (0.6 / epoch.max(1) as f32).max(VAL_LOSS_FLOOR)
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpochRecord {
    pub epoch: u32,
    pub train_loss: f32,
    pub val_loss: f32,
}

impl EpochRecord {
    pub fn for_epoch(epoch: u32) -> Self {
        Self {
            epoch,
            train_loss: train_loss(epoch),
            val_loss: val_loss(epoch),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "phase", rename_all = "lowercase"))]
pub enum TrainerPhase {
    #[default]
    Idle,
    Running {
        run_id: u64,
    },
    Complete,
}

/// Result of feeding one tick to the trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Not running, or the tick belonged to an earlier run.
    Ignored,
    Advanced(EpochRecord),
    /// The record for the final epoch; the trainer is now complete.
    Finished(EpochRecord),
}

#[derive(Debug, Clone)]
pub struct SimulatedTrainer {
    phase: TrainerPhase,
    epoch: u32,
    progress: u8,
    history: Vec<EpochRecord>,
    total_epochs: u32,
    progress_step: u8,
}

impl SimulatedTrainer {
    pub fn new(cfg: &DemoConfig) -> Self {
        Self {
            phase: TrainerPhase::Idle,
            epoch: 0,
            progress: 0,
            history: Vec::new(),
            total_epochs: cfg.total_epochs.clamp(1, MAX_TOTAL_EPOCHS),
            progress_step: cfg.progress_step.clamp(1, 100),
        }
    }

    pub fn phase(&self) -> TrainerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TrainerPhase::Running { .. })
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn total_epochs(&self) -> u32 {
        self.total_epochs
    }

    /// Progress bar percentage, 0..=100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn history(&self) -> &[EpochRecord] {
        &self.history
    }

    /// Reset counters and history and begin a new run.
    pub fn start(&mut self, run_id: u64) {
        self.epoch = 0;
        self.progress = 0;
        self.history.clear();
        self.phase = TrainerPhase::Running { run_id };
        info!(run_id, total_epochs = self.total_epochs, "training started");
    }

    /// Stop a running run. Records reached so far are kept.
    pub fn cancel(&mut self) {
        if let TrainerPhase::Running { run_id } = self.phase {
            self.phase = TrainerPhase::Idle;
            info!(run_id, epoch = self.epoch, "training cancelled");
        }
    }

    pub fn tick(&mut self, run_id: u64) -> Step {
        match self.phase {
            TrainerPhase::Running { run_id: current } if current == run_id => {}
            _ => return Step::Ignored,
        }

        self.epoch += 1;
        let record = EpochRecord::for_epoch(self.epoch);
        self.history.push(record);
        self.progress = self.progress.saturating_add(self.progress_step).min(100);
        debug!(
            run_id,
            epoch = record.epoch,
            train_loss = record.train_loss,
            val_loss = record.val_loss,
            progress = self.progress,
            "epoch"
        );

        if self.epoch >= self.total_epochs {
            self.phase = TrainerPhase::Complete;
            info!(run_id, epochs = self.epoch, "training complete");
            Step::Finished(record)
        } else {
            Step::Advanced(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer() -> SimulatedTrainer {
        SimulatedTrainer::new(&DemoConfig::default())
    }

    #[test]
    fn loss_formulas_hit_their_floors() {
        assert_eq!(train_loss(1), 0.5);
        assert_eq!(val_loss(1), 0.6);
        assert!((train_loss(10) - 0.05).abs() < 1e-6);
        assert_eq!(train_loss(25), 0.02);
        assert_eq!(train_loss(1000), TRAIN_LOSS_FLOOR);
        assert_eq!(val_loss(1000), VAL_LOSS_FLOOR);
    }

    #[test]
    fn full_run_produces_ten_monotonic_records() {
        let mut t = trainer();
        t.start(1);
        let mut finished = 0;
        for i in 1..=10u32 {
            match t.tick(1) {
                Step::Advanced(_) => assert!(i < 10, "advanced at {i}"),
                Step::Finished(r) => {
                    assert_eq!(r.epoch, 10);
                    finished += 1;
                }
                Step::Ignored => panic!("tick {i} ignored"),
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(t.phase(), TrainerPhase::Complete);
        assert_eq!(t.progress(), 100);

        let h = t.history();
        assert_eq!(h.len(), 10);
        for (i, r) in h.iter().enumerate() {
            let e = i as u32 + 1;
            assert_eq!(r.epoch, e);
            assert_eq!(r.train_loss, (0.5 / e as f32).max(0.02));
            assert_eq!(r.val_loss, (0.6 / e as f32).max(0.03));
        }
    }

    #[test]
    fn ticks_after_completion_are_ignored() {
        let mut t = trainer();
        t.start(4);
        for _ in 0..10 {
            t.tick(4);
        }
        assert_eq!(t.tick(4), Step::Ignored);
        assert_eq!(t.history().len(), 10);
    }

    #[test]
    fn progress_advances_in_steps_and_caps() {
        let mut t = SimulatedTrainer::new(&DemoConfig {
            progress_step: 30,
            ..DemoConfig::default()
        });
        t.start(1);
        let mut seen = Vec::new();
        for _ in 0..5 {
            t.tick(1);
            seen.push(t.progress());
        }
        assert_eq!(seen, vec![30, 60, 90, 100, 100]);
    }

    #[test]
    fn cancel_stops_appends_and_keeps_history() {
        let mut t = trainer();
        t.start(2);
        t.tick(2);
        t.tick(2);
        t.tick(2);
        t.cancel();
        assert_eq!(t.phase(), TrainerPhase::Idle);
        for _ in 0..20 {
            assert_eq!(t.tick(2), Step::Ignored);
        }
        assert_eq!(t.history().len(), 3);
        assert_eq!(t.history().last().map(|r| r.epoch), Some(3));
    }

    #[test]
    fn stale_run_ticks_are_ignored() {
        let mut t = trainer();
        t.start(1);
        t.tick(1);
        t.start(2);
        assert!(t.history().is_empty());
        assert_eq!(t.tick(1), Step::Ignored);
        assert!(matches!(t.tick(2), Step::Advanced(r) if r.epoch == 1));
    }

    #[test]
    fn huge_epoch_count_is_capped_without_reserving() {
        let cfg = DemoConfig {
            total_epochs: u32::MAX,
            ..DemoConfig::default()
        };
        let mut t = SimulatedTrainer::new(&cfg);
        assert_eq!(t.total_epochs(), MAX_TOTAL_EPOCHS);
        assert_eq!(t.history().len(), 0);
        t.start(1);
        assert!(matches!(t.tick(1), Step::Advanced(r) if r.epoch == 1));
    }
}
