//! Implements TokenInteractionPort for OTP-style hardware tokens.
//!
//! Touching such a token makes it type its response like a keyboard, so the
//! interaction is a text prompt that reads whatever the token emits.

use crate::adapters::ui::progress::IndicatifProgress;
use crate::adapters::ui::{prompt_outcome, run_prompt};
use crate::domain::{
    CollectionOutcome, DomainError, HardwareTokenPurpose, TokenRequest, TokenResponse,
};
use crate::ports::TokenInteractionPort;
use async_trait::async_trait;
use inquire::Text;
use std::sync::Arc;
use tracing::debug;

pub struct InquireTokenInteraction {
    progress: Arc<IndicatifProgress>,
}

impl InquireTokenInteraction {
    pub fn new(progress: Arc<IndicatifProgress>) -> Self {
        Self { progress }
    }
}

fn prompt_text(purpose: HardwareTokenPurpose) -> String {
    let action = match purpose {
        HardwareTokenPurpose::KeyToCard => "move the key onto it",
        HardwareTokenPurpose::Decrypt => "decrypt",
        HardwareTokenPurpose::Sign => "sign",
    };
    format!("Touch your security token to {}:", action)
}

#[async_trait]
impl TokenInteractionPort for InquireTokenInteraction {
    async fn request_token(
        &self,
        request: TokenRequest,
    ) -> Result<CollectionOutcome<TokenResponse>, DomainError> {
        debug!(code = %request.code, purpose = %request.purpose, "waiting for token touch");
        let text = prompt_text(request.purpose);
        let answer = run_prompt(Arc::clone(&self.progress), move || {
            Text::new(&text)
                .with_help_message("Esc to cancel")
                .prompt()
        })
        .await
        .map_err(|e| DomainError::TokenInteraction(format!("prompt task: {}", e)))?;

        prompt_outcome(
            answer.map(|s| s.trim().to_string()),
            |response| TokenResponse::new(request.purpose, response.into_bytes()),
            DomainError::TokenInteraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_purpose() {
        assert!(prompt_text(HardwareTokenPurpose::Sign).ends_with("to sign:"));
        assert!(prompt_text(HardwareTokenPurpose::KeyToCard).contains("move the key"));
    }
}
