//! One headless pass through the demo flow, printed as text.

use std::fmt;
use std::io::{self, Write};

use aedemo::config::DemoConfig;
use aedemo::controller::{DemoController, DemoSnapshot, TickOutcome};
use aedemo::evaluation::SampleLabel;
use aedemo::preview::PREPROCESS_STEPS;
use aedemo::schedule::Tick;
use aedemo::view::View;
use tokio::sync::mpsc;
use tracing::info;

use crate::error::RunnerError;
use crate::ticker::{TokioScheduler, TokioTickHandle};

/// Controller plus the tokio tick source driving it.
pub struct Session {
    pub demo: DemoController<TokioTickHandle>,
    sched: TokioScheduler,
    ticks: mpsc::UnboundedReceiver<Tick>,
}

impl Session {
    pub fn new(cfg: DemoConfig) -> Self {
        let (sched, ticks) = TokioScheduler::new();
        Self {
            demo: DemoController::new(cfg),
            sched,
            ticks,
        }
    }

    pub fn go_to(&mut self, view: View) -> Result<(), RunnerError> {
        Ok(self.demo.go_to(view, &mut self.sched)?)
    }

    pub fn load_csv(&mut self, file_name: Option<String>, text: &str) -> Result<(), RunnerError> {
        Ok(self.demo.load_csv(file_name, text, &mut self.sched)?)
    }

    /// Wait for the next tick and feed it to the controller.
    pub async fn next_tick(&mut self) -> Result<TickOutcome, RunnerError> {
        let tick = self
            .ticks
            .recv()
            .await
            .ok_or(RunnerError::TickChannelClosed)?;
        Ok(self.demo.on_tick(tick))
    }

    /// Feed every tick already queued without waiting. Returns how many were delivered.
    pub fn drain_queued(&mut self) -> usize {
        let mut n = 0;
        while let Ok(tick) = self.ticks.try_recv() {
            self.demo.on_tick(tick);
            n += 1;
        }
        n
    }
}

struct Printer<'a, W: Write> {
    out: &'a mut W,
    quiet: bool,
}

impl<W: Write> Printer<'_, W> {
    fn line(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")
    }
}

/// Options for [`run_walkthrough`].
#[derive(Debug, Clone, Default)]
pub struct Walkthrough {
    pub file_name: Option<String>,
    pub csv: String,
    /// Navigate home after this epoch instead of waiting for results.
    pub stop_after: Option<u32>,
    /// Suppress the text walkthrough.
    pub quiet: bool,
}

pub async fn run_walkthrough(
    cfg: DemoConfig,
    plan: &Walkthrough,
    out: &mut impl Write,
) -> Result<DemoSnapshot, RunnerError> {
    let mut session = Session::new(cfg);
    let mut p = Printer {
        out,
        quiet: plan.quiet,
    };

    session.go_to(View::Upload)?;
    session.load_csv(plan.file_name.clone(), &plan.csv)?;
    if let Some(d) = session.demo.dataset() {
        p.line(format_args!("== {}", View::Upload.title()))?;
        p.line(format_args!("{}", d.preview.header().join(" | ")))?;
        for row in d.preview.rows() {
            p.line(format_args!("{}", row.join(" | ")))?;
        }
        p.line(format_args!("Detected features: {}", d.feature_count))?;
    }

    p.line(format_args!("== {}", View::Preprocess.title()))?;
    for step in PREPROCESS_STEPS {
        p.line(format_args!("  - {step}"))?;
    }

    session.go_to(View::Train)?;
    p.line(format_args!("== {}", View::Train.title()))?;
    loop {
        match session.next_tick().await? {
            TickOutcome::Ignored => continue,
            TickOutcome::Advanced(r) | TickOutcome::Completed(r) => {
                p.line(format_args!(
                    "epoch {:>2}  progress {:>3}%  train {:.4}  val {:.4}",
                    r.epoch,
                    session.demo.progress(),
                    r.train_loss,
                    r.val_loss
                ))?;
                if session.demo.view() == View::Results {
                    break;
                }
                if plan.stop_after == Some(r.epoch) {
                    info!(epoch = r.epoch, "leaving training early");
                    session.go_to(View::Landing)?;
                    p.line(format_args!("stopped after epoch {}", r.epoch))?;
                    return Ok(session.demo.snapshot());
                }
            }
        }
    }

    let report = session.demo.report();
    let m = session.demo.metrics();
    p.line(format_args!("== {}", View::Results.title()))?;
    for label in [SampleLabel::Normal, SampleLabel::Anomaly] {
        let errs: Vec<f32> = report
            .samples
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.reconstruction_error)
            .collect();
        let lo = errs.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = errs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        p.line(format_args!(
            "MAE {:<7} n={} min={:.4} max={:.4}",
            label.label(),
            errs.len(),
            lo,
            hi
        ))?;
    }
    let cm = report.matrix;
    p.line(format_args!("                 pred normal  pred anomaly"))?;
    p.line(format_args!("true normal      {:>11}  {:>12}", cm.tn(), cm.fp()))?;
    p.line(format_args!("true anomaly     {:>11}  {:>12}", cm.fn_(), cm.tp()))?;
    p.line(format_args!("Precision (Anomaly) {:.3}", m.precision))?;
    p.line(format_args!("Recall (Anomaly)    {:.3}", m.recall))?;
    p.line(format_args!("Accuracy            {:.3}", m.accuracy))?;
    p.line(format_args!("{}", session.demo.export_results()))?;

    Ok(session.demo.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aedemo::evaluation::ConfusionMatrix;
    use aedemo::preview::SAMPLE_CSV;
    use aedemo::trainer::TrainerPhase;
    use std::time::Duration;
    use tokio::time::{self, Instant};

    fn plan() -> Walkthrough {
        Walkthrough {
            file_name: Some("sample.csv".to_string()),
            csv: SAMPLE_CSV.to_string(),
            ..Walkthrough::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_takes_ten_periods_and_lands_on_results() {
        let start = Instant::now();
        let mut out = Vec::new();
        let snap = run_walkthrough(DemoConfig::default(), &plan(), &mut out)
            .await
            .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(6_000));
        assert!(elapsed < Duration::from_millis(6_100));

        assert_eq!(snap.view, View::Results);
        assert_eq!(snap.phase, TrainerPhase::Complete);
        assert_eq!(snap.progress, 100);
        assert_eq!(snap.feature_count, Some(6));
        assert_eq!(snap.history.len(), 10);
        assert_eq!(snap.report.matrix, ConfusionMatrix([[180, 20], [15, 25]]));
        assert_eq!(snap.report.samples.len(), 80);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Detected features: 6"));
        assert!(text.contains("epoch 10  progress 100%"));
        assert!(text.contains("Precision (Anomaly) 0.556"));
        assert!(text.contains("Recall (Anomaly)    0.625"));
        assert!(text.contains("Accuracy            0.854"));
        assert!(text.contains("Ready for backend integration"));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_after_halts_appends() {
        let mut out = Vec::new();
        let p = Walkthrough {
            stop_after: Some(3),
            quiet: true,
            ..plan()
        };
        let snap = run_walkthrough(DemoConfig::default(), &p, &mut out)
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(snap.view, View::Landing);
        assert_eq!(snap.phase, TrainerPhase::Idle);
        assert_eq!(snap.history.len(), 3);
        assert!(snap.report.samples.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn late_ticks_after_navigation_are_dropped() {
        let mut s = Session::new(DemoConfig::default());
        s.go_to(View::Train).unwrap();
        for _ in 0..4 {
            assert!(matches!(s.next_tick().await.unwrap(), TickOutcome::Advanced(_)));
        }
        s.go_to(View::Upload).unwrap();
        assert!(!s.demo.has_active_tick());

        time::sleep(Duration::from_secs(30)).await;
        s.drain_queued();
        assert_eq!(s.demo.history().len(), 4);
        assert!(s.demo.history().iter().all(|r| r.epoch <= 4));
        assert_eq!(s.demo.view(), View::Upload);
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_scheduler_closes_the_tick_channel() {
        let mut s = Session::new(DemoConfig::default());
        let (fresh, _rx) = TokioScheduler::new();
        // Drops the only sender feeding `s.ticks`.
        s.sched = fresh;
        assert!(matches!(
            s.next_tick().await,
            Err(RunnerError::TickChannelClosed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_csv_is_reported() {
        let mut out = Vec::new();
        let p = Walkthrough {
            csv: "\n\n".to_string(),
            ..plan()
        };
        let err = run_walkthrough(DemoConfig::default(), &p, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Demo(aedemo::error::DemoError::MalformedInput)
        ));
    }
}
