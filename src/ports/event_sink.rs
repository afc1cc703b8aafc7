//! Executor-facing end of an Attempt's event channel.

use crate::domain::{EventKind, ExecutorEvent, OperationResult, ProgressUpdate};
use tokio::sync::mpsc;
use tracing::debug;

/// Handle one submission reports through.
///
/// Not `Clone`: [`finish`](Self::finish) consumes it, so a submission can emit at
/// most one result and never a progress update after it.
pub struct EventSink<S> {
    submission: u64,
    tx: mpsc::UnboundedSender<ExecutorEvent<S>>,
}

impl<S> EventSink<S> {
    pub(crate) fn new(submission: u64, tx: mpsc::UnboundedSender<ExecutorEvent<S>>) -> Self {
        Self { submission, tx }
    }

    pub fn submission(&self) -> u64 {
        self.submission
    }

    /// Report progress. Returns false once nobody is listening anymore.
    pub fn progress(&self, message: impl Into<String>, current: u64, max: u64) -> bool {
        self.send(EventKind::Progress(ProgressUpdate {
            message: message.into(),
            current,
            max,
        }))
    }

    /// Report the final or pending result and close this submission.
    pub fn finish(self, result: OperationResult<S>) -> bool {
        self.send(EventKind::Result(result))
    }

    fn send(&self, kind: EventKind<S>) -> bool {
        let sent = self
            .tx
            .send(ExecutorEvent {
                submission: self.submission,
                kind,
            })
            .is_ok();
        if !sent {
            debug!(submission = self.submission, "attempt closed, event dropped");
        }
        sent
    }
}
