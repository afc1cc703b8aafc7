//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    CollectionOutcome, CryptoInputMaterial, Diagnostic, DomainError, Passphrase,
    PassphraseRequest, ProgressStyle, ProgressUpdate, TokenRequest, TokenResponse,
};
use crate::ports::EventSink;
use std::sync::Arc;

/// Out-of-process worker that performs the actual crypto operation.
///
/// `submit` must return immediately. The work runs elsewhere and reports back
/// through `sink`: any number of progress updates, then exactly one
/// [`finish`](EventSink::finish).
pub trait Executor<R, S>: Send + Sync {
    fn submit(
        &self,
        request: Arc<R>,
        material: CryptoInputMaterial,
        sink: EventSink<S>,
    ) -> Result<(), DomainError>;
}

/// Collects a passphrase from the user.
#[async_trait::async_trait]
pub trait SecretEntryPort: Send + Sync {
    /// Returns `Cancelled` when the user declines. `Err` is reserved for the
    /// collaborator itself failing (terminal gone, prompt crashed).
    async fn request_passphrase(
        &self,
        request: PassphraseRequest,
    ) -> Result<CollectionOutcome<Passphrase>, DomainError>;
}

/// Drives a physical interaction with a hardware token.
#[async_trait::async_trait]
pub trait TokenInteractionPort: Send + Sync {
    async fn request_token(
        &self,
        request: TokenRequest,
    ) -> Result<CollectionOutcome<TokenResponse>, DomainError>;
}

/// Progress indicator surface. Indicators are identified by `tag`.
pub trait ProgressPort: Send + Sync {
    fn show(&self, tag: &str, message: &str, style: ProgressStyle, cancelable: bool);

    fn set_progress(&self, tag: &str, update: &ProgressUpdate);

    fn dismiss(&self, tag: &str);
}

/// Renders an operation failure to the user.
pub trait NotificationPort: Send + Sync {
    fn notify_error(&self, diagnostic: &Diagnostic);
}
