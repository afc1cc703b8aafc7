//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `DomainError`. Protocol violations are
//! programming errors and are kept in their own type so they never look like a
//! user-facing failure.

use super::entities::RequestCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Executor error: {0}")]
    Executor(String),

    #[error("Secret entry failed: {0}")]
    SecretEntry(String),

    #[error("Token interaction failed: {0}")]
    TokenInteraction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The executor or a collaborator broke the resumption protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    #[error("attempt {attempt}: event received while {phase}")]
    UnexpectedEvent { attempt: u64, phase: &'static str },

    #[error("attempt {attempt}: event from submission {received}, awaiting submission {expected}")]
    StaleSubmission {
        attempt: u64,
        expected: u64,
        received: u64,
    },

    #[error("attempt {attempt}: collection started while {phase}")]
    NothingPending { attempt: u64, phase: &'static str },

    #[error("attempt {attempt}: collection outcome for {code} received while {phase}")]
    UnexpectedCollection {
        attempt: u64,
        code: RequestCode,
        phase: &'static str,
    },

    /// Every sink was dropped before a result arrived.
    #[error("attempt {attempt}: executor went away without reporting a result")]
    ExecutorVanished { attempt: u64 },
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("attempt {0} is still in flight; finish or cancel it first")]
    AttemptInFlight(u64),

    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
}
