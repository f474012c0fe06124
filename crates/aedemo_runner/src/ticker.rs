//! Recurring training tick backed by a tokio task.
//!
//! Each scheduled tick is a task feeding [`Tick`]s into one channel shared by
//! every run. Cancelling the handle stops the task; ticks already queued are
//! dropped by the controller because their run is no longer current.

use std::time::Duration;

use aedemo::error::DemoResult;
use aedemo::schedule::{Tick, TickHandle, TickScheduler};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct TokioTickHandle {
    token: CancellationToken,
}

impl TickHandle for TokioTickHandle {
    fn cancel(&mut self) {
        self.token.cancel();
    }
}

pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Tick>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TickScheduler for TokioScheduler {
    type Handle = TokioTickHandle;

    /// Must be called from within a tokio runtime.
    fn schedule(&mut self, period: Duration, run_id: u64) -> DemoResult<TokioTickHandle> {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            // First firing one period after scheduling, like a browser interval.
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(Tick { run_id }).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!(run_id, "tick task stopped");
        });

        Ok(TokioTickHandle { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_every_period_until_cancelled() {
        let (mut sched, mut rx) = TokioScheduler::new();
        let start = Instant::now();
        let mut handle = sched.schedule(Duration::from_millis(600), 7).unwrap();

        for n in 1..=3u32 {
            assert_eq!(rx.recv().await, Some(Tick { run_id: 7 }));
            let expected = Duration::from_millis(600) * n;
            let elapsed = start.elapsed();
            assert!(elapsed >= expected && elapsed < expected + Duration::from_millis(5));
        }

        handle.cancel();
        time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let (mut sched, _rx) = TokioScheduler::new();
        let mut handle = sched.schedule(Duration::from_millis(10), 1).unwrap();
        handle.cancel();
        handle.cancel();
        assert!(handle.token.is_cancelled());
    }
}
