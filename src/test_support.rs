//! Scripted fakes for the ports. Test-only.

use crate::domain::{
    CollectionOutcome, CryptoInputMaterial, Diagnostic, DomainError, OperationResult, Passphrase,
    PassphraseRequest, ProgressStyle, ProgressUpdate, TokenRequest, TokenResponse,
};
use crate::ports::{
    EventSink, Executor, NotificationPort, OperationHooks, ProgressPort, SecretEntryPort,
    TokenInteractionPort,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

enum Scripted<S> {
    Finish(OperationResult<S>),
    /// Drop the sink without a result.
    Vanish,
    Reject(DomainError),
}

/// What the scripted executor does with one submission.
pub struct Submission<S> {
    progress: Vec<ProgressUpdate>,
    outcome: Scripted<S>,
}

impl<S> Submission<S> {
    pub fn finishing(result: OperationResult<S>) -> Self {
        Self {
            progress: Vec::new(),
            outcome: Scripted::Finish(result),
        }
    }

    pub fn vanishing() -> Self {
        Self {
            progress: Vec::new(),
            outcome: Scripted::Vanish,
        }
    }

    pub fn rejecting(error: DomainError) -> Self {
        Self {
            progress: Vec::new(),
            outcome: Scripted::Reject(error),
        }
    }

    pub fn with_progress(mut self, progress: Vec<ProgressUpdate>) -> Self {
        self.progress = progress;
        self
    }
}

/// Executor that replays one scripted [`Submission`] per `submit` and records what it got.
pub struct ScriptedExecutor<R, S> {
    script: Mutex<VecDeque<Submission<S>>>,
    submitted: Mutex<Vec<(Arc<R>, CryptoInputMaterial)>>,
}

impl<R, S> ScriptedExecutor<R, S> {
    pub fn new(script: Vec<Submission<S>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> Vec<(Arc<R>, CryptoInputMaterial)> {
        self.submitted.lock().expect("submitted lock").clone()
    }
}

impl<R, S> Executor<R, S> for ScriptedExecutor<R, S>
where
    R: Send + Sync,
    S: Send,
{
    fn submit(
        &self,
        request: Arc<R>,
        material: CryptoInputMaterial,
        sink: EventSink<S>,
    ) -> Result<(), DomainError> {
        self.submitted
            .lock()
            .expect("submitted lock")
            .push((request, material));

        let Some(step) = self.script.lock().expect("script lock").pop_front() else {
            return Err(DomainError::Executor("script exhausted".into()));
        };
        for update in step.progress {
            sink.progress(update.message, update.current, update.max);
        }
        match step.outcome {
            Scripted::Finish(result) => {
                sink.finish(result);
                Ok(())
            }
            Scripted::Vanish => Ok(()),
            Scripted::Reject(error) => Err(error),
        }
    }
}

#[derive(Default)]
struct ProgressLog {
    shows: usize,
    updates: usize,
    dismissals: usize,
    last_cancelable: Option<bool>,
}

#[derive(Default)]
pub struct RecordingProgress {
    log: Mutex<ProgressLog>,
}

impl RecordingProgress {
    pub fn shows(&self) -> usize {
        self.log.lock().expect("progress lock").shows
    }

    pub fn updates(&self) -> usize {
        self.log.lock().expect("progress lock").updates
    }

    pub fn dismissals(&self) -> usize {
        self.log.lock().expect("progress lock").dismissals
    }

    pub fn last_show_cancelable(&self) -> Option<bool> {
        self.log.lock().expect("progress lock").last_cancelable
    }
}

impl ProgressPort for RecordingProgress {
    fn show(&self, _tag: &str, _message: &str, _style: ProgressStyle, cancelable: bool) {
        let mut log = self.log.lock().expect("progress lock");
        log.shows += 1;
        log.last_cancelable = Some(cancelable);
    }

    fn set_progress(&self, _tag: &str, _update: &ProgressUpdate) {
        self.log.lock().expect("progress lock").updates += 1;
    }

    fn dismiss(&self, _tag: &str) {
        self.log.lock().expect("progress lock").dismissals += 1;
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notified: Mutex<Vec<Diagnostic>>,
}

impl RecordingNotifier {
    pub fn notified(&self) -> Vec<Diagnostic> {
        self.notified.lock().expect("notifier lock").clone()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify_error(&self, diagnostic: &Diagnostic) {
        self.notified
            .lock()
            .expect("notifier lock")
            .push(diagnostic.clone());
    }
}

pub struct ScriptedSecretEntry {
    outcomes: Mutex<VecDeque<CollectionOutcome<Passphrase>>>,
    requests: Mutex<Vec<PassphraseRequest>>,
}

impl ScriptedSecretEntry {
    pub fn new(outcomes: Vec<CollectionOutcome<Passphrase>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Obtains each of `secrets` in turn.
    pub fn obtaining(secrets: &[&str]) -> Self {
        Self::new(
            secrets
                .iter()
                .map(|s| CollectionOutcome::Obtained(Passphrase::new(*s)))
                .collect(),
        )
    }

    pub fn requests(&self) -> Vec<PassphraseRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait::async_trait]
impl SecretEntryPort for ScriptedSecretEntry {
    async fn request_passphrase(
        &self,
        request: PassphraseRequest,
    ) -> Result<CollectionOutcome<Passphrase>, DomainError> {
        self.requests.lock().expect("requests lock").push(request);
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .ok_or_else(|| DomainError::SecretEntry("script exhausted".into()))
    }
}

pub struct ScriptedTokenInteraction {
    outcomes: Mutex<VecDeque<CollectionOutcome<TokenResponse>>>,
    requests: Mutex<Vec<TokenRequest>>,
}

impl ScriptedTokenInteraction {
    pub fn new(outcomes: Vec<CollectionOutcome<TokenResponse>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TokenRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait::async_trait]
impl TokenInteractionPort for ScriptedTokenInteraction {
    async fn request_token(
        &self,
        request: TokenRequest,
    ) -> Result<CollectionOutcome<TokenResponse>, DomainError> {
        self.requests.lock().expect("requests lock").push(request);
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .ok_or_else(|| DomainError::TokenInteraction("script exhausted".into()))
    }
}

/// Secret entry that blocks until the test releases an outcome.
pub struct GatedSecretEntry {
    gate: Mutex<Option<oneshot::Receiver<CollectionOutcome<Passphrase>>>>,
}

impl GatedSecretEntry {
    pub fn new() -> (Self, oneshot::Sender<CollectionOutcome<Passphrase>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait::async_trait]
impl SecretEntryPort for GatedSecretEntry {
    async fn request_passphrase(
        &self,
        _request: PassphraseRequest,
    ) -> Result<CollectionOutcome<Passphrase>, DomainError> {
        let gate = self.gate.lock().expect("gate lock").take();
        let Some(gate) = gate else {
            return Err(DomainError::SecretEntry("gate already used".into()));
        };
        gate.await
            .map_err(|_| DomainError::SecretEntry("gate dropped".into()))
    }
}

/// Hooks that record every call. `build_request` hands out a clone of `request`.
pub struct RecordingHooks<R, S> {
    request: Option<R>,
    builds: AtomicUsize,
    successes: Mutex<Vec<S>>,
    errors: Mutex<Vec<Diagnostic>>,
    cancellations: AtomicUsize,
}

impl<R, S> RecordingHooks<R, S> {
    fn with_request(request: Option<R>) -> Self {
        Self {
            request,
            builds: AtomicUsize::new(0),
            successes: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            cancellations: AtomicUsize::new(0),
        }
    }

    pub fn building(request: R) -> Self {
        Self::with_request(Some(request))
    }

    pub fn declining() -> Self {
        Self::with_request(None)
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn cancellations(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.errors.lock().expect("errors lock").clone()
    }
}

impl<R, S: Clone> RecordingHooks<R, S> {
    pub fn successes(&self) -> Vec<S> {
        self.successes.lock().expect("successes lock").clone()
    }
}

impl<R, S> OperationHooks<R, S> for RecordingHooks<R, S>
where
    R: Clone + Send + Sync,
    S: Send,
{
    fn build_request(&self) -> Option<R> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.request.clone()
    }

    fn on_success(&self, payload: S) {
        self.successes.lock().expect("successes lock").push(payload);
    }

    fn on_error(&self, diagnostic: &Diagnostic, notifier: &dyn NotificationPort) {
        self.errors
            .lock()
            .expect("errors lock")
            .push(diagnostic.clone());
        notifier.notify_error(diagnostic);
    }

    fn on_cancelled(&self) {
        self.cancellations.fetch_add(1, Ordering::SeqCst);
    }
}
