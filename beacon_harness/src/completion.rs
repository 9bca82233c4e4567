//! The single synchronization point between an example task and the runner's
//! teardown logic: a write-once cell the task (or the runner itself) resolves
//! exactly once. The first writer wins; every later write is an observable
//! no-op, which keeps a task-driven success and an externally-triggered error
//! from double-executing teardown.

use crate::error::HarnessError;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

/// What a run left behind when it signalled completion
#[derive(Debug)]
pub enum RunOutcome<C> {
    /// The run ended with a live session that must still be closed
    Completed(Arc<C>),
    /// The run failed before a usable session existed
    Failed(HarnessError),
}

/// Write-once handle given to the example task
pub struct CompletionSignal<C> {
    tx: Arc<Mutex<Option<oneshot::Sender<RunOutcome<C>>>>>,
}

impl<C> Clone for CompletionSignal<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// The runner-side half; resolves once the paired signal is written
pub struct CompletionListener<C> {
    rx: oneshot::Receiver<RunOutcome<C>>,
}

impl<C> CompletionSignal<C> {
    pub fn channel() -> (Self, CompletionListener<C>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            CompletionListener { rx },
        )
    }

    /// Marks the run finished with a session that still needs an orderly
    /// disconnect. Returns whether this call performed the write.
    pub fn complete(&self, client: Arc<C>) -> bool {
        self.write(RunOutcome::Completed(client))
    }

    /// Marks the run failed before a usable session existed. Returns whether
    /// this call performed the write.
    pub fn fail(&self, error: HarnessError) -> bool {
        self.write(RunOutcome::Failed(error))
    }

    /// Whether the cell has already left its pending state
    pub fn is_completed(&self) -> bool {
        self.tx.lock().is_none()
    }

    fn write(&self, outcome: RunOutcome<C>) -> bool {
        match self.tx.lock().take() {
            Some(tx) => {
                // a dropped listener still counts as a performed write; the
                // cell is no longer pending either way
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }
}

impl<C> CompletionListener<C> {
    /// The run's single suspension point. A task that never writes the signal
    /// stalls here indefinitely.
    pub async fn wait(self) -> RunOutcome<C> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(err) => RunOutcome::Failed(err.into()),
        }
    }
}
