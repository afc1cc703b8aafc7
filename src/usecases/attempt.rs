//! State of one Attempt: the original request, the material gathered so far and
//! the phase of the dispatch -> pending -> resolve -> re-dispatch cycle.
//!
//! Every event and collection outcome is checked against the current phase.
//! Anything that does not fit is a [`ProtocolViolation`] and leaves state untouched.

use crate::domain::{
    CollectionOutcome, CryptoInputItem, CryptoInputMaterial, EventKind, ExecutorEvent,
    ProtocolViolation, RequestCode, RequiredInput,
};
use crate::usecases::input_resolver::route;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Dispatching { submission: u64 },
    AwaitingEvent { submission: u64 },
    PendingInput(RequiredInput),
    AwaitingCollection(RequestCode),
    Terminal,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Dispatching { .. } => "dispatching",
            Phase::AwaitingEvent { .. } => "awaiting event",
            Phase::PendingInput(_) => "pending input",
            Phase::AwaitingCollection(_) => "awaiting collection",
            Phase::Terminal => "terminal",
        }
    }
}

/// What a valid collection outcome leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resumption {
    /// Material grew by one item; re-dispatch the same request.
    Redispatch,
    Cancelled,
}

pub struct Attempt<R> {
    id: u64,
    request: Arc<R>,
    material: CryptoInputMaterial,
    phase: Phase,
    submissions: u64,
}

impl<R> Attempt<R> {
    /// An Attempt whose first submission has already been handed to the executor.
    pub fn submitted(id: u64, request: Arc<R>, material: CryptoInputMaterial) -> Self {
        Self {
            id,
            request,
            material,
            phase: Phase::AwaitingEvent { submission: 1 },
            submissions: 1,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &Arc<R> {
        &self.request
    }

    pub fn material(&self) -> &CryptoInputMaterial {
        &self.material
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of executor submissions so far, the first one included.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Unwrap an event if it belongs to the submission we are waiting on.
    ///
    /// Each submission reports on its own channel, so a superseded sink is
    /// normally disconnected before anything it sends gets here. The submission
    /// check still holds for events handed over directly.
    pub fn accept_event<S>(
        &mut self,
        event: ExecutorEvent<S>,
    ) -> Result<EventKind<S>, ProtocolViolation> {
        match self.phase {
            Phase::AwaitingEvent { submission } if submission == event.submission => {
                Ok(event.kind)
            }
            Phase::AwaitingEvent { submission } => Err(ProtocolViolation::StaleSubmission {
                attempt: self.id,
                expected: submission,
                received: event.submission,
            }),
            phase => Err(ProtocolViolation::UnexpectedEvent {
                attempt: self.id,
                phase: phase.name(),
            }),
        }
    }

    /// The executor asked for `required`. Nothing has been routed yet.
    pub fn await_input(&mut self, required: RequiredInput) {
        self.phase = Phase::PendingInput(required);
    }

    /// Route the pending input to its collaborator. Returns what to collect and
    /// the request code the outcome must come back under.
    pub fn begin_collection(&mut self) -> Result<(RequiredInput, RequestCode), ProtocolViolation> {
        let Phase::PendingInput(required) = self.phase else {
            return Err(ProtocolViolation::NothingPending {
                attempt: self.id,
                phase: self.phase.name(),
            });
        };
        let code = route(&required).request_code();
        self.phase = Phase::AwaitingCollection(code);
        Ok((required, code))
    }

    pub fn accept_collection(
        &mut self,
        code: RequestCode,
        outcome: CollectionOutcome<CryptoInputItem>,
    ) -> Result<Resumption, ProtocolViolation> {
        match self.phase {
            Phase::AwaitingCollection(expected) if expected == code => {}
            phase => {
                return Err(ProtocolViolation::UnexpectedCollection {
                    attempt: self.id,
                    code,
                    phase: phase.name(),
                });
            }
        }

        match outcome {
            CollectionOutcome::Obtained(item) => {
                self.material.push(item);
                self.submissions += 1;
                self.phase = Phase::Dispatching {
                    submission: self.submissions,
                };
                Ok(Resumption::Redispatch)
            }
            CollectionOutcome::Cancelled => {
                self.phase = Phase::Terminal;
                Ok(Resumption::Cancelled)
            }
        }
    }

    /// The re-dispatch in `Dispatching` reached the executor.
    pub fn redispatched(&mut self) {
        if let Phase::Dispatching { submission } = self.phase {
            self.phase = Phase::AwaitingEvent { submission };
        }
    }

    pub fn terminate(&mut self) {
        self.phase = Phase::Terminal;
    }
}
