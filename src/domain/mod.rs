//! Core domain layer. No external I/O dependencies.
//!
//! Entities and the error taxonomy live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    CollectionOutcome, CryptoInputItem, CryptoInputMaterial, Diagnostic, EventKind,
    ExecutorEvent, HardwareTokenPurpose, OperationResult, Passphrase, PassphraseRequest,
    ProgressStyle, ProgressUpdate, REQUEST_PASSPHRASE, REQUEST_TOKEN, RequestCode,
    RequiredInput, TokenRequest, TokenResponse,
};
pub use errors::{DomainError, OrchestratorError, ProtocolViolation};
