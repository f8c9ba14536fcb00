//! Two-phase result disclosure. The matching pass completes eagerly and
//! synchronously; a separate fixed-duration timer drives the processing
//! display before the precomputed result is handed over. The timer is
//! cancellable and never re-runs or retries the computation.

use std::time::Duration;

use tokio::sync::watch;

/// Progress frame emitted once per step while a reveal is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressFrame {
    pub step: u32,
    pub total_steps: u32,
    pub percent: u8,
}

/// Pacing of the disclosure timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    total: Duration,
    steps: u32,
}

impl RevealSchedule {
    pub fn new(total: Duration, steps: u32) -> Self {
        Self {
            total,
            steps: steps.max(1),
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn step_interval(&self) -> Duration {
        self.total / self.steps
    }

    fn frame(&self, step: u32) -> ProgressFrame {
        ProgressFrame {
            step,
            total_steps: self.steps,
            percent: (step * 100 / self.steps) as u8,
        }
    }
}

/// Raised when the reveal was cancelled before the timer ran out. The
/// computed result is dropped; nothing was retried or re-run.
#[derive(Debug, thiserror::Error)]
#[error("reveal cancelled before completion")]
pub struct RevealCancelled;

/// Sender half of a cancellation pair. Dropping the handle without calling
/// [`CancelHandle::cancel`] leaves the reveal running to completion.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiver half of a cancellation pair.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // handle dropped without cancelling: never resolves
                std::future::pending::<()>().await;
            }
        }
    }
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// An eagerly computed result whose disclosure is gated behind the
/// progress timer.
#[derive(Debug)]
pub struct StagedReveal<T> {
    result: T,
    schedule: RevealSchedule,
}

impl<T> StagedReveal<T> {
    pub fn new(result: T, schedule: RevealSchedule) -> Self {
        Self { result, schedule }
    }

    /// Skip the presentation delay entirely (exports, tests, scripting).
    pub fn into_inner(self) -> T {
        self.result
    }

    /// Play the progress schedule, emitting one frame per step, then yield
    /// the precomputed result. Cancelling aborts the timer between frames
    /// with no other side effects.
    pub async fn run<F>(
        self,
        mut on_progress: F,
        mut cancel: CancelToken,
    ) -> Result<T, RevealCancelled>
    where
        F: FnMut(ProgressFrame),
    {
        let interval = self.schedule.step_interval();
        for step in 1..=self.schedule.steps() {
            tokio::select! {
                _ = tokio::time::sleep(interval) => on_progress(self.schedule.frame(step)),
                _ = cancel.cancelled() => return Err(RevealCancelled),
            }
        }
        Ok(self.result)
    }
}
