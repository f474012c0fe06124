//! The demo view controller: one owner for the active view and everything the
//! views display.
//!
//! Hosts pass the controller explicitly to their rendering layer and feed it
//! user actions and ticks. Entering [`View::Train`] is the only thing that
//! starts a run; leaving it while running cancels the run.

use tracing::{info, warn};

use crate::config::DemoConfig;
use crate::error::DemoResult;
use crate::evaluation::{EvaluationReport, Metrics};
use crate::preview::LoadedDataset;
use crate::prng::Prng;
use crate::schedule::{CancelOnDrop, Tick, TickHandle, TickScheduler};
use crate::trainer::{EpochRecord, SimulatedTrainer, Step, TrainerPhase};
use crate::view::View;

/// Notice surfaced by the export action. Nothing is written anywhere.
pub const EXPORT_NOTICE: &str = "Ready for backend integration";

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Ignored,
    Advanced(EpochRecord),
    /// Final epoch reached; results were synthesized and the view is now `Results`.
    Completed(EpochRecord),
}

pub struct DemoController<H: TickHandle> {
    cfg: DemoConfig,
    view: View,
    dataset: Option<LoadedDataset>,
    trainer: SimulatedTrainer,
    report: EvaluationReport,
    handle: Option<CancelOnDrop<H>>,
    next_run_id: u64,
    rng: Prng,
}

impl<H: TickHandle> DemoController<H> {
    pub fn new(cfg: DemoConfig) -> Self {
        let cfg = cfg.sanitized();
        Self {
            view: View::Landing,
            dataset: None,
            trainer: SimulatedTrainer::new(&cfg),
            report: EvaluationReport::default(),
            handle: None,
            next_run_id: 1,
            rng: Prng::new(cfg.seed),
            cfg,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.cfg
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }

    pub fn trainer(&self) -> &SimulatedTrainer {
        &self.trainer
    }

    pub fn history(&self) -> &[EpochRecord] {
        self.trainer.history()
    }

    pub fn progress(&self) -> u8 {
        self.trainer.progress()
    }

    pub fn report(&self) -> &EvaluationReport {
        &self.report
    }

    pub fn metrics(&self) -> Metrics {
        self.report.metrics()
    }

    /// True while a recurring tick is scheduled.
    pub fn has_active_tick(&self) -> bool {
        self.handle.is_some()
    }

    /// Switch the active view.
    ///
    /// Entering `Train` cancels any scheduled tick and starts a fresh run. Any
    /// other view cancels a running trainer. If scheduling fails the view is
    /// left unchanged.
    pub fn go_to<S>(&mut self, view: View, scheduler: &mut S) -> DemoResult<()>
    where
        S: TickScheduler<Handle = H>,
    {
        if view == View::Train {
            self.start_training(scheduler)?;
        } else if self.trainer.is_running() {
            self.cancel_tick();
            self.trainer.cancel();
        }
        if self.view != view {
            info!(from = %self.view, to = %view, "view");
        }
        self.view = view;
        Ok(())
    }

    /// Navigate by label. Unknown labels fail with `InvalidView` and change nothing.
    pub fn go_to_label<S>(&mut self, label: &str, scheduler: &mut S) -> DemoResult<()>
    where
        S: TickScheduler<Handle = H>,
    {
        let view = label.parse::<View>().map_err(|e| {
            warn!(label, current = %self.view, "rejected navigation");
            e
        })?;
        self.go_to(view, scheduler)
    }

    fn start_training<S>(&mut self, scheduler: &mut S) -> DemoResult<()>
    where
        S: TickScheduler<Handle = H>,
    {
        // Only one tick may exist at a time.
        self.cancel_tick();
        self.trainer.cancel();

        let run_id = self.next_run_id;
        self.next_run_id += 1;
        let handle = scheduler.schedule(self.cfg.tick_period(), run_id)?;
        self.handle = Some(CancelOnDrop(handle));
        self.trainer.start(run_id);
        Ok(())
    }

    fn cancel_tick(&mut self) {
        // Dropping the wrapper cancels the handle.
        self.handle = None;
    }

    /// Deliver one tick from the host's timer.
    pub fn on_tick(&mut self, tick: Tick) -> TickOutcome {
        match self.trainer.tick(tick.run_id) {
            Step::Ignored => TickOutcome::Ignored,
            Step::Advanced(record) => TickOutcome::Advanced(record),
            Step::Finished(record) => {
                self.cancel_tick();
                self.report = EvaluationReport::synthesize(&mut self.rng);
                info!(
                    samples = self.report.samples.len(),
                    from = %self.view,
                    "results ready"
                );
                self.view = View::Results;
                TickOutcome::Completed(record)
            }
        }
    }

    /// Replace the loaded dataset with a preview of `text` and move on to preprocessing.
    ///
    /// On `MalformedInput` the dataset is cleared and the view stays on `Upload`.
    pub fn load_csv<S>(
        &mut self,
        file_name: Option<String>,
        text: &str,
        scheduler: &mut S,
    ) -> DemoResult<()>
    where
        S: TickScheduler<Handle = H>,
    {
        match LoadedDataset::from_text(file_name, text) {
            Ok(dataset) => {
                info!(
                    file = dataset.file_name.as_deref().unwrap_or("<unnamed>"),
                    features = dataset.feature_count,
                    rows = dataset.preview.rows().len(),
                    "dataset loaded"
                );
                self.dataset = Some(dataset);
                self.go_to(View::Preprocess, scheduler)
            }
            Err(e) => {
                warn!(error = %e, "upload rejected");
                self.dataset = None;
                self.go_to(View::Upload, scheduler)?;
                Err(e)
            }
        }
    }

    /// Placeholder for a future backend export. Performs no I/O.
    pub fn export_results(&self) -> &'static str {
        info!("export requested");
        EXPORT_NOTICE
    }

    pub fn snapshot(&self) -> DemoSnapshot {
        DemoSnapshot {
            view: self.view,
            phase: self.trainer.phase(),
            progress: self.trainer.progress(),
            feature_count: self.dataset.as_ref().map(|d| d.feature_count),
            history: self.trainer.history().to_vec(),
            report: self.report.clone(),
            metrics: self.metrics(),
        }
    }
}

/// Point-in-time copy of the controller state, for printing or serialization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoSnapshot {
    pub view: View,
    pub phase: TrainerPhase,
    pub progress: u8,
    pub feature_count: Option<usize>,
    pub history: Vec<EpochRecord>,
    pub report: EvaluationReport,
    pub metrics: Metrics,
}

#[cfg(feature = "serde")]
impl DemoSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
