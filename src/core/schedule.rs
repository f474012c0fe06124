//! The recurring training tick, as seen by the controller.
//!
//! Hosts own the actual timer (a browser interval, a tokio task). They hand the
//! controller a handle when a tick is scheduled and deliver [`Tick`]s back to
//! [`crate::controller::DemoController::on_tick`].

use core::time::Duration;

use crate::error::DemoResult;

/// One firing of a scheduled tick, tagged with the run that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub run_id: u64,
}

/// Handle to a scheduled recurring tick.
pub trait TickHandle {
    /// Stop further firings. Must be idempotent.
    fn cancel(&mut self);
}

/// Creates recurring ticks for the controller.
pub trait TickScheduler {
    type Handle: TickHandle;

    /// Start firing `Tick { run_id }` every `period` until the handle is cancelled.
    fn schedule(&mut self, period: Duration, run_id: u64) -> DemoResult<Self::Handle>;
}

/// Cancels the inner handle when dropped.
#[derive(Debug)]
pub struct CancelOnDrop<H: TickHandle>(pub H);

impl<H: TickHandle> Drop for CancelOnDrop<H> {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
