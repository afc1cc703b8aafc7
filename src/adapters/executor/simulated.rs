//! Simulated signing executor for the demo binary.
//!
//! Behaves like an out-of-process signing service: work runs on a spawned task,
//! reports progress and asks for the key passphrase (and a token touch when the
//! key lives on a card) before it produces a signature. No real cryptography.

use crate::domain::{
    CryptoInputMaterial, Diagnostic, DomainError, HardwareTokenPurpose, OperationResult,
    RequiredInput,
};
use crate::ports::{EventSink, Executor};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// What the demo asks the executor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    pub message: String,
}

/// Simulated detached signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub hex: String,
}

const STEPS: u64 = 3;

pub struct SimulatedExecutor {
    passphrase: Arc<str>,
    require_token: bool,
    step_delay: Duration,
}

impl SimulatedExecutor {
    pub fn new(passphrase: impl Into<String>, require_token: bool, step_delay: Duration) -> Self {
        Self {
            passphrase: Arc::from(passphrase.into()),
            require_token,
            step_delay,
        }
    }

    async fn run(
        passphrase: Arc<str>,
        require_token: bool,
        step_delay: Duration,
        request: Arc<SignRequest>,
        material: CryptoInputMaterial,
        sink: EventSink<Signature>,
    ) {
        sink.progress("Loading key…", 1, STEPS);
        tokio::time::sleep(step_delay).await;

        let result = match check_material(&passphrase, require_token, &material) {
            Some(stop) => stop,
            None => {
                sink.progress("Hashing message…", 2, STEPS);
                tokio::time::sleep(step_delay).await;
                sink.progress("Signing…", STEPS, STEPS);
                tokio::time::sleep(step_delay).await;
                OperationResult::Success(sign(&request.message, &material))
            }
        };
        info!(submission = sink.submission(), "[SIMULATED] submission finished");
        sink.finish(result);
    }
}

/// Returns the pending/error result that stops this submission, if any.
fn check_material(
    expected: &str,
    require_token: bool,
    material: &CryptoInputMaterial,
) -> Option<OperationResult<Signature>> {
    let Some(passphrase) = material.passphrase() else {
        return Some(OperationResult::Pending(RequiredInput::SecretPassphrase {
            symmetric: false,
        }));
    };
    if passphrase.expose() != expected {
        return Some(OperationResult::Error(Diagnostic::new("bad passphrase")));
    }
    if require_token && material.token_response(HardwareTokenPurpose::Sign).is_none() {
        return Some(OperationResult::Pending(RequiredInput::HardwareToken {
            purpose: HardwareTokenPurpose::Sign,
        }));
    }
    None
}

fn sign(message: &str, material: &CryptoInputMaterial) -> Signature {
    let mut hasher = DefaultHasher::new();
    message.hash(&mut hasher);
    if let Some(token) = material.token_response(HardwareTokenPurpose::Sign) {
        token.as_bytes().hash(&mut hasher);
    }
    Signature {
        hex: format!("{:016x}", hasher.finish()),
    }
}

impl Executor<SignRequest, Signature> for SimulatedExecutor {
    fn submit(
        &self,
        request: Arc<SignRequest>,
        material: CryptoInputMaterial,
        sink: EventSink<Signature>,
    ) -> Result<(), DomainError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| DomainError::Executor(format!("no async runtime: {}", e)))?;
        info!(
            submission = sink.submission(),
            material = material.len(),
            "[SIMULATED] accepted sign request"
        );
        runtime.spawn(Self::run(
            Arc::clone(&self.passphrase),
            self.require_token,
            self.step_delay,
            request,
            material,
            sink,
        ));
        Ok(())
    }
}
