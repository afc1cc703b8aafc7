//! Demo view: signs one message typed by the user. Implements OperationHooks.

use crate::adapters::executor::{SignRequest, Signature};
use crate::ports::OperationHooks;
use crossterm::style::Stylize;

pub struct SignMessageView {
    message: String,
}

impl SignMessageView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl OperationHooks<SignRequest, Signature> for SignMessageView {
    /// Declines on an empty message.
    fn build_request(&self) -> Option<SignRequest> {
        let message = self.message.trim();
        if message.is_empty() {
            return None;
        }
        Some(SignRequest {
            message: message.to_string(),
        })
    }

    fn on_success(&self, payload: Signature) {
        println!("{} {}", "✔ Signature:".green().bold(), payload.hex);
    }

    fn on_cancelled(&self) {
        println!("{}", "Signing cancelled.".dark_grey());
    }
}
