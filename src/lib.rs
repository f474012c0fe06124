//! # aedemo
//!
//! Core of the autoencoder anomaly-detection walkthrough demo.
//!
//! Nothing in this crate trains or evaluates a model. It drives a five-screen
//! flow (landing → upload → preprocess → train → results), previews an
//! uploaded CSV, runs a simulated training loop from a recurring tick and
//! fabricates the evaluation artifacts shown at the end.
//!
//! ## Quick Start
//!
//! ```
//! use aedemo::prelude::*;
//! use core::time::Duration;
//!
//! struct NoTimer;
//! impl TickHandle for NoTimer {
//!     fn cancel(&mut self) {}
//! }
//! impl TickScheduler for NoTimer {
//!     type Handle = NoTimer;
//!     fn schedule(&mut self, _period: Duration, _run_id: u64) -> DemoResult<NoTimer> {
//!         Ok(NoTimer)
//!     }
//! }
//!
//! let mut sched = NoTimer;
//! let mut demo: DemoController<NoTimer> = DemoController::new(DemoConfig::default());
//! demo.load_csv(None, SAMPLE_CSV, &mut sched).unwrap();
//! demo.go_to(View::Train, &mut sched).unwrap();
//!
//! let run_id = match demo.trainer().phase() {
//!     TrainerPhase::Running { run_id } => run_id,
//!     _ => unreachable!(),
//! };
//! while demo.view() == View::Train {
//!     demo.on_tick(Tick { run_id });
//! }
//! assert_eq!(demo.view(), View::Results);
//! assert_eq!(demo.history().len(), 10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization of the data model and JSON snapshots
//!
//! ## Modules
//!
//! - [`controller`]: the view controller hosts drive
//! - [`preview`]: CSV preview loader and the sample dataset
//! - [`trainer`]: simulated training state machine
//! - [`evaluation`]: fabricated samples, confusion matrix and metrics
//! - [`schedule`]: recurring tick seam implemented by hosts

#[path = "core/config.rs"]
pub mod config;

#[path = "core/controller.rs"]
pub mod controller;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/evaluation.rs"]
pub mod evaluation;

#[path = "core/preview.rs"]
pub mod preview;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/schedule.rs"]
pub mod schedule;

#[path = "core/trainer.rs"]
pub mod trainer;

#[path = "core/view.rs"]
pub mod view;

/// Prelude module for convenient imports.
///
/// ```
/// use aedemo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::DemoConfig;
    pub use crate::controller::{DemoController, DemoSnapshot, TickOutcome, EXPORT_NOTICE};
    pub use crate::error::{DemoError, DemoResult};
    pub use crate::evaluation::{
        ConfusionMatrix, EvaluationReport, EvaluationSample, Metrics, SampleLabel,
    };
    pub use crate::preview::{LoadedDataset, PreviewTable, PREPROCESS_STEPS, SAMPLE_CSV};
    pub use crate::prng::{Prng, RandomSource};
    pub use crate::schedule::{Tick, TickHandle, TickScheduler};
    pub use crate::trainer::{EpochRecord, TrainerPhase};
    pub use crate::view::{View, NAV_ITEMS};
}
