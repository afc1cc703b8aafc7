//! Builds the request, shows the progress indicator and hands work to the executor.
//!
//! The indicator is keyed by [`PROGRESS_TAG`] and shown at most once per Attempt.
//! It stays up across pending -> resolve -> re-dispatch and is dismissed once the
//! Attempt ends.

use crate::domain::{CryptoInputMaterial, DomainError, ProgressStyle, ProgressUpdate};
use crate::ports::{EventSink, Executor, ProgressPort};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace};

/// Fixed identity of the one progress indicator.
pub const PROGRESS_TAG: &str = "crypto-operation-progress";

/// The user cannot abandon an Attempt from the indicator itself.
const CANCELABLE: bool = false;

/// How the indicator is presented when first shown.
#[derive(Debug, Clone)]
pub struct ProgressSettings {
    pub message: String,
    pub style: ProgressStyle,
}

pub struct Dispatcher<R, S> {
    executor: Arc<dyn Executor<R, S>>,
    progress: Arc<dyn ProgressPort>,
    settings: ProgressSettings,
    showing: AtomicBool,
}

impl<R, S> Dispatcher<R, S> {
    pub fn new(
        executor: Arc<dyn Executor<R, S>>,
        progress: Arc<dyn ProgressPort>,
        settings: ProgressSettings,
    ) -> Self {
        Self {
            executor,
            progress,
            settings,
            showing: AtomicBool::new(false),
        }
    }

    /// Build a request and submit it with `material`.
    ///
    /// Returns `Ok(None)` without dispatching or showing anything when the builder
    /// declines. The returned request is reused for every resumption.
    pub fn start(
        &self,
        build_request: impl FnOnce() -> Option<R>,
        material: CryptoInputMaterial,
        sink: EventSink<S>,
    ) -> Result<Option<Arc<R>>, DomainError> {
        let Some(request) = build_request() else {
            debug!("request builder declined, nothing dispatched");
            return Ok(None);
        };
        let request = Arc::new(request);
        self.submit(&request, material, sink)?;
        Ok(Some(request))
    }

    /// Submit an already built request. Shows the indicator if it is not up yet.
    pub fn submit(
        &self,
        request: &Arc<R>,
        material: CryptoInputMaterial,
        sink: EventSink<S>,
    ) -> Result<(), DomainError> {
        self.show_progress();
        info!(
            submission = sink.submission(),
            material = material.len(),
            "submitting to executor"
        );
        self.executor.submit(Arc::clone(request), material, sink)
    }

    /// Forward an update to the indicator. Ignored when none is showing.
    pub fn update_progress(&self, update: &ProgressUpdate) {
        if !self.showing.load(Ordering::Acquire) {
            trace!(message = %update.message, "no indicator, progress ignored");
            return;
        }
        self.progress.set_progress(PROGRESS_TAG, update);
    }

    /// Dismiss the indicator. Returns false if it was not showing.
    pub fn dismiss_progress(&self) -> bool {
        if !self.showing.swap(false, Ordering::AcqRel) {
            return false;
        }
        self.progress.dismiss(PROGRESS_TAG);
        true
    }

    fn show_progress(&self) {
        if self.showing.swap(true, Ordering::AcqRel) {
            return;
        }
        self.progress.show(
            PROGRESS_TAG,
            &self.settings.message,
            self.settings.style,
            CANCELABLE,
        );
    }
}
