//! Attempt-owned event subscription, gated by the owning view's foreground state.
//!
//! Each Attempt owns its subscription and every submission gets a fresh typed
//! channel. Events are only handed to the orchestrator while the view is in the
//! foreground. While it is not, progress is dropped and the first result is
//! parked until the view comes back.

use crate::domain::ExecutorEvent;
use crate::ports::EventSink;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Foreground state of the view that owns the orchestrator. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Foreground {
    tx: Arc<watch::Sender<bool>>,
}

impl Foreground {
    pub fn new(active: bool) -> Self {
        let (tx, _rx) = watch::channel(active);
        Self { tx: Arc::new(tx) }
    }

    /// The view became visible; start consuming events.
    pub fn activate(&self) {
        debug!("view active, consuming executor events");
        self.tx.send_replace(true);
    }

    /// The view went away; stop consuming events until reactivated.
    pub fn deactivate(&self) {
        debug!("view inactive, holding executor events");
        self.tx.send_replace(false);
    }

    pub fn is_active(&self) -> bool {
        *self.tx.borrow()
    }

    fn watch(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for Foreground {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Open the subscription for one Attempt. It holds no sender until the first
/// [`sink`](EventSubscription::sink) is minted.
pub fn open<S>(foreground: &Foreground) -> EventSubscription<S> {
    let (_closed, rx) = mpsc::unbounded_channel();
    EventSubscription {
        rx,
        _foreground: foreground.clone(),
        active: foreground.watch(),
        parked: None,
    }
}

/// Consumer side of an Attempt's events.
pub struct EventSubscription<S> {
    rx: mpsc::UnboundedReceiver<ExecutorEvent<S>>,
    // Keeps the watch sender alive so `changed()` only fails if we are dropped.
    _foreground: Foreground,
    active: watch::Receiver<bool>,
    parked: Option<ExecutorEvent<S>>,
}

impl<S> EventSubscription<S> {
    /// Sink for a new submission. Replaces the channel of the previous
    /// submission, whose sink has already been finished or dropped. The
    /// subscription keeps no sender, so the channel closes when the executor
    /// drops the sink.
    pub fn sink(&mut self, submission: u64) -> EventSink<S> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = rx;
        EventSink::new(submission, tx)
    }

    /// Next event while in the foreground. `None` once every sink is gone and
    /// nothing is parked.
    pub async fn next(&mut self) -> Option<ExecutorEvent<S>> {
        loop {
            let active = *self.active.borrow_and_update();

            if active {
                if let Some(event) = self.parked.take() {
                    debug!(submission = event.submission, "delivering parked event");
                    return Some(event);
                }
                tokio::select! {
                    event = self.rx.recv() => return event,
                    _ = self.active.changed() => continue,
                }
            }

            tokio::select! {
                event = self.rx.recv(), if self.parked.is_none() => match event {
                    Some(event) if event.is_progress() => {
                        debug!(submission = event.submission, "view inactive, progress dropped");
                    }
                    Some(event) => {
                        debug!(submission = event.submission, "view inactive, parking result");
                        self.parked = Some(event);
                    }
                    None => return None,
                },
                _ = self.active.changed() => {}
            }
        }
    }
}
