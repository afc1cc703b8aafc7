//! Routes a required-input descriptor to the collaborator that can satisfy it.
//!
//! Routing is a total match over [`RequiredInput`]: there is no fallback arm, so an
//! unrouted variant is a compile error rather than a runtime fault.

use crate::domain::{
    CollectionOutcome, CryptoInputItem, DomainError, PassphraseRequest, REQUEST_PASSPHRASE,
    REQUEST_TOKEN, RequestCode, RequiredInput, TokenRequest,
};
use crate::ports::{SecretEntryPort, TokenInteractionPort};
use std::sync::Arc;
use tracing::{debug, info};

/// The two collection collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    SecretEntry,
    TokenInteraction,
}

impl Collaborator {
    pub fn request_code(self) -> RequestCode {
        match self {
            Collaborator::SecretEntry => REQUEST_PASSPHRASE,
            Collaborator::TokenInteraction => REQUEST_TOKEN,
        }
    }
}

pub fn route(required: &RequiredInput) -> Collaborator {
    match required {
        RequiredInput::SecretPassphrase { .. } => Collaborator::SecretEntry,
        RequiredInput::HardwareToken { .. } => Collaborator::TokenInteraction,
    }
}

/// Input resolver. Issues one collection request and awaits its outcome.
pub struct InputResolver {
    secret_entry: Arc<dyn SecretEntryPort>,
    token_interaction: Arc<dyn TokenInteractionPort>,
}

impl InputResolver {
    pub fn new(
        secret_entry: Arc<dyn SecretEntryPort>,
        token_interaction: Arc<dyn TokenInteractionPort>,
    ) -> Self {
        Self {
            secret_entry,
            token_interaction,
        }
    }

    /// Ask the routed collaborator for `required`. The obtained item is already
    /// wrapped for merging into the Attempt's material.
    pub async fn resolve(
        &self,
        required: &RequiredInput,
    ) -> Result<CollectionOutcome<CryptoInputItem>, DomainError> {
        let code = route(required).request_code();
        info!(%code, input = %required, "requesting input");

        let outcome = match *required {
            RequiredInput::SecretPassphrase { symmetric } => self
                .secret_entry
                .request_passphrase(PassphraseRequest { code, symmetric })
                .await?
                .map(CryptoInputItem::Passphrase),
            RequiredInput::HardwareToken { purpose } => self
                .token_interaction
                .request_token(TokenRequest { code, purpose })
                .await?
                .map(CryptoInputItem::TokenResponse),
        };

        debug!(
            %code,
            obtained = matches!(outcome, CollectionOutcome::Obtained(_)),
            "collection finished"
        );
        Ok(outcome)
    }
}
