//! Inbound port. The view that starts an operation plugs its logic in here.

use crate::domain::Diagnostic;
use crate::ports::NotificationPort;

/// Caller-side hooks for one kind of crypto operation.
///
/// `R` is the request payload, `S` the success payload.
pub trait OperationHooks<R, S>: Send + Sync {
    /// Build the request. `None` means the caller declines to proceed
    /// (missing preconditions); nothing is dispatched.
    fn build_request(&self) -> Option<R>;

    fn on_success(&self, payload: S);

    /// Default: surface the diagnostic through the notification collaborator.
    fn on_error(&self, diagnostic: &Diagnostic, notifier: &dyn NotificationPort) {
        notifier.notify_error(diagnostic);
    }

    /// Default: nothing beyond the indicator dismissal the orchestrator already does.
    fn on_cancelled(&self) {}
}
