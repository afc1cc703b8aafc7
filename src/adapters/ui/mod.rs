//! Terminal host for the collaborators: inquire prompts, an indicatif progress
//! indicator and colored error notifications.

pub mod notify;
pub mod passphrase;
pub mod progress;
pub mod sign_view;
pub mod theme;
pub mod token;

use crate::adapters::ui::progress::IndicatifProgress;
use crate::domain::{CollectionOutcome, DomainError};
use inquire::InquireError;
use std::sync::Arc;
use tokio::task::JoinError;

/// Applies the prompt theme. Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    theme::apply_theme();
}

/// Run a blocking prompt off the runtime with the progress bars held still, so
/// their ticker does not draw over it.
pub(crate) async fn run_prompt<T>(
    progress: Arc<IndicatifProgress>,
    prompt: impl FnOnce() -> T + Send + 'static,
) -> Result<T, JoinError>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || progress.suspend(prompt)).await
}

/// Esc and Ctrl-C mean the user declined; anything else is the prompt failing.
pub(crate) fn prompt_outcome<T>(
    answer: Result<String, InquireError>,
    obtained: impl FnOnce(String) -> T,
    failed: impl FnOnce(String) -> DomainError,
) -> Result<CollectionOutcome<T>, DomainError> {
    match answer {
        Ok(value) => Ok(CollectionOutcome::Obtained(obtained(value))),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(CollectionOutcome::Cancelled)
        }
        Err(e) => Err(failed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProgressStyle, ProgressUpdate};
    use crate::ports::ProgressPort;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_escape_and_interrupt_are_cancellation() {
        for err in [
            InquireError::OperationCanceled,
            InquireError::OperationInterrupted,
        ] {
            let outcome = prompt_outcome(Err(err), |s| s, DomainError::SecretEntry).unwrap();
            assert_eq!(outcome, CollectionOutcome::Cancelled);
        }
    }

    #[test]
    fn test_other_prompt_errors_are_failures() {
        let err = InquireError::NotTTY;
        let result = prompt_outcome(Err(err), |s| s, DomainError::TokenInteraction);
        assert!(matches!(result, Err(DomainError::TokenInteraction(_))));
    }

    #[test]
    fn test_answer_is_obtained() {
        let outcome =
            prompt_outcome(Ok("hunter2".into()), |s| s.len(), DomainError::SecretEntry).unwrap();
        assert_eq!(outcome, CollectionOutcome::Obtained(7));
    }

    #[tokio::test]
    async fn test_bar_holds_still_while_prompt_is_open() {
        let progress = Arc::new(IndicatifProgress::new());
        progress.show("op", "working", ProgressStyle::Horizontal, false);

        let (updated_tx, updated_rx) = mpsc::channel();
        let writer = {
            let progress = Arc::clone(&progress);
            move || {
                progress.set_progress(
                    "op",
                    &ProgressUpdate {
                        message: "redraw".into(),
                        current: 1,
                        max: 2,
                    },
                );
                updated_tx.send(()).ok();
            }
        };

        let (blocked, handle, updated_rx) = run_prompt(Arc::clone(&progress), move || {
            let handle = std::thread::spawn(writer);
            let blocked = updated_rx.recv_timeout(Duration::from_millis(50)).is_err();
            (blocked, handle, updated_rx)
        })
        .await
        .unwrap();

        assert!(blocked, "bar was redrawn while the prompt was open");
        handle.join().unwrap();
        assert!(updated_rx.try_recv().is_ok());
        progress.dismiss("op");
    }
}
