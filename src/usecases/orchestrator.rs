//! Top-level retry loop: dispatch, wait for the executor, collect missing input,
//! re-dispatch with the merged material, until the Attempt succeeds, fails or is
//! cancelled.
//!
//! One Attempt at a time per orchestrator; a second start while one is in flight
//! is rejected with [`OrchestratorError::AttemptInFlight`].

use crate::domain::{
    CollectionOutcome, CryptoInputMaterial, Diagnostic, EventKind, OrchestratorError,
    ProtocolViolation,
};
use crate::ports::{NotificationPort, OperationHooks};
use crate::usecases::attempt::{Attempt, Resumption};
use crate::usecases::classifier::{Classification, Termination, classify};
use crate::usecases::dispatcher::Dispatcher;
use crate::usecases::event_subscription::{self, EventSubscription, Foreground};
use crate::usecases::input_resolver::InputResolver;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

/// What happened to an Attempt, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The request builder produced nothing; nothing was dispatched.
    Declined,
    Succeeded,
    Failed,
    Cancelled,
}

/// Orchestrator. Owns the dispatcher, the resolver and the foreground gate.
pub struct Orchestrator<R, S> {
    dispatcher: Dispatcher<R, S>,
    resolver: InputResolver,
    notifier: Arc<dyn NotificationPort>,
    foreground: Foreground,
    /// Id of the Attempt in flight, 0 when idle.
    in_flight: AtomicU64,
    next_attempt: AtomicU64,
}

impl<R, S> Orchestrator<R, S>
where
    R: Send + Sync + 'static,
    S: Send + 'static,
{
    pub fn new(
        dispatcher: Dispatcher<R, S>,
        resolver: InputResolver,
        notifier: Arc<dyn NotificationPort>,
        foreground: Foreground,
    ) -> Self {
        Self {
            dispatcher,
            resolver,
            notifier,
            foreground,
            in_flight: AtomicU64::new(0),
            next_attempt: AtomicU64::new(1),
        }
    }

    /// Foreground gate of the owning view. Activate when it becomes visible,
    /// deactivate when it goes away.
    pub fn foreground(&self) -> &Foreground {
        &self.foreground
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) != 0
    }

    /// Start an Attempt with empty material.
    pub async fn crypto_operation<H>(&self, hooks: &H) -> Result<AttemptOutcome, OrchestratorError>
    where
        H: OperationHooks<R, S>,
    {
        self.crypto_operation_with_input(hooks, CryptoInputMaterial::new())
            .await
    }

    /// Start an Attempt with material the caller already holds.
    pub async fn crypto_operation_with_input<H>(
        &self,
        hooks: &H,
        material: CryptoInputMaterial,
    ) -> Result<AttemptOutcome, OrchestratorError>
    where
        H: OperationHooks<R, S>,
    {
        let id = self.next_attempt.fetch_add(1, Ordering::Relaxed);
        let _guard = self.claim(id)?;

        let mut events = event_subscription::open(self.foreground());
        let first_sink = events.sink(1);
        let request = match self
            .dispatcher
            .start(|| hooks.build_request(), material.clone(), first_sink)
        {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(AttemptOutcome::Declined),
            Err(e) => {
                warn!(attempt = id, error = %e, "dispatch failed");
                let termination = Termination::Error(Diagnostic::new(e.to_string()));
                return Ok(self.finish(id, hooks, termination));
            }
        };
        info!(attempt = id, "attempt started");

        let mut attempt = Attempt::submitted(id, request, material);
        match self.drive(&mut attempt, &mut events).await {
            Ok(termination) => Ok(self.finish(id, hooks, termination)),
            Err(violation) => {
                error!(attempt = id, %violation, "attempt aborted");
                self.dispatcher.dismiss_progress();
                Err(violation.into())
            }
        }
    }

    /// Run the event / collection loop until the Attempt terminates.
    async fn drive(
        &self,
        attempt: &mut Attempt<R>,
        events: &mut EventSubscription<S>,
    ) -> Result<Termination<S>, ProtocolViolation> {
        loop {
            let Some(event) = events.next().await else {
                attempt.terminate();
                return Err(ProtocolViolation::ExecutorVanished {
                    attempt: attempt.id(),
                });
            };

            let result = match attempt.accept_event(event) {
                Ok(EventKind::Progress(update)) => {
                    self.dispatcher.update_progress(&update);
                    continue;
                }
                Ok(EventKind::Result(result)) => result,
                Err(violation) => {
                    error!(%violation, "ignoring out-of-state event");
                    continue;
                }
            };

            let required = match classify(result) {
                Classification::Terminal(termination) => {
                    attempt.terminate();
                    return Ok(termination);
                }
                Classification::Pending(required) => required,
            };

            attempt.await_input(required);
            let (required, code) = attempt.begin_collection()?;
            debug!(attempt = attempt.id(), %code, input = %required, "awaiting collection");
            let outcome = match self.resolver.resolve(&required).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(attempt = attempt.id(), error = %e, "input collection failed");
                    attempt.terminate();
                    return Ok(Termination::Error(Diagnostic::new(e.to_string())));
                }
            };
            let obtained = matches!(outcome, CollectionOutcome::Obtained(_));

            match attempt.accept_collection(code, outcome)? {
                Resumption::Cancelled => return Ok(Termination::Cancelled),
                Resumption::Redispatch => {
                    debug!(attempt = attempt.id(), obtained, "resuming with merged material");
                    let sink = events.sink(attempt.submissions());
                    let material = attempt.material().clone();
                    if let Err(e) = self.dispatcher.submit(attempt.request(), material, sink) {
                        warn!(attempt = attempt.id(), error = %e, "re-dispatch failed");
                        attempt.terminate();
                        return Ok(Termination::Error(Diagnostic::new(e.to_string())));
                    }
                    attempt.redispatched();
                }
            }
        }
    }

    /// Dismiss the indicator and fire exactly one hook for the terminal branch.
    fn finish<H>(&self, id: u64, hooks: &H, termination: Termination<S>) -> AttemptOutcome
    where
        H: OperationHooks<R, S>,
    {
        self.dispatcher.dismiss_progress();
        info!(attempt = id, outcome = termination.label(), "attempt finished");
        match termination {
            Termination::Success(payload) => {
                hooks.on_success(payload);
                AttemptOutcome::Succeeded
            }
            Termination::Error(diagnostic) => {
                hooks.on_error(&diagnostic, self.notifier.as_ref());
                AttemptOutcome::Failed
            }
            Termination::Cancelled => {
                hooks.on_cancelled();
                AttemptOutcome::Cancelled
            }
        }
    }

    fn claim(&self, id: u64) -> Result<InFlight<'_, R, S>, OrchestratorError> {
        match self
            .in_flight
            .compare_exchange(0, id, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(InFlight {
                id,
                slot: &self.in_flight,
                dispatcher: &self.dispatcher,
            }),
            Err(current) => {
                warn!(attempt = current, rejected = id, "attempt already in flight");
                Err(OrchestratorError::AttemptInFlight(current))
            }
        }
    }
}

/// Scope of one Attempt. Dropping it tears the indicator down and frees the
/// single-Attempt slot, also when the caller drops the Attempt future midway.
struct InFlight<'a, R, S> {
    id: u64,
    slot: &'a AtomicU64,
    dispatcher: &'a Dispatcher<R, S>,
}

impl<R, S> Drop for InFlight<'_, R, S> {
    fn drop(&mut self) {
        if self.dispatcher.dismiss_progress() {
            warn!(attempt = self.id, "attempt dropped before it finished");
        }
        self.slot.store(0, Ordering::Release);
    }
}
