//! Implements SecretEntryPort with a masked inquire password prompt.

use crate::adapters::ui::progress::IndicatifProgress;
use crate::adapters::ui::{prompt_outcome, run_prompt};
use crate::domain::{CollectionOutcome, DomainError, Passphrase, PassphraseRequest};
use crate::ports::SecretEntryPort;
use async_trait::async_trait;
use inquire::{Password, PasswordDisplayMode};
use std::sync::Arc;
use tracing::debug;

/// Passphrase prompt. Runs on the blocking pool so the runtime keeps polling.
pub struct InquireSecretEntry {
    progress: Arc<IndicatifProgress>,
}

impl InquireSecretEntry {
    /// `progress` is the indicator sharing the terminal; it is held still while
    /// the prompt is open.
    pub fn new(progress: Arc<IndicatifProgress>) -> Self {
        Self { progress }
    }
}

fn prompt_text(request: &PassphraseRequest) -> &'static str {
    if request.symmetric {
        "Passphrase for symmetric encryption:"
    } else {
        "Passphrase to unlock your key:"
    }
}

#[async_trait]
impl SecretEntryPort for InquireSecretEntry {
    async fn request_passphrase(
        &self,
        request: PassphraseRequest,
    ) -> Result<CollectionOutcome<Passphrase>, DomainError> {
        debug!(code = %request.code, symmetric = request.symmetric, "opening passphrase prompt");
        let text = prompt_text(&request);
        let answer = run_prompt(Arc::clone(&self.progress), move || {
            Password::new(text)
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked)
                .with_help_message("Esc to cancel")
                .prompt()
        })
        .await
        .map_err(|e| DomainError::SecretEntry(format!("prompt task: {}", e)))?;

        prompt_outcome(answer, Passphrase::new, DomainError::SecretEntry)
    }
}
