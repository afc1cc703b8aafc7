//! Domain entities. Pure data describing one crypto operation and what it still needs.
//!
//! No terminal/executor types here. Adapters map their own representations into these.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// What a hardware token is being asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareTokenPurpose {
    /// Move a key onto the card.
    KeyToCard,
    Decrypt,
    Sign,
}

impl fmt::Display for HardwareTokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HardwareTokenPurpose::KeyToCard => "key-to-card",
            HardwareTokenPurpose::Decrypt => "decrypt",
            HardwareTokenPurpose::Sign => "sign",
        };
        f.write_str(s)
    }
}

/// The additional input an executor needs before it can continue.
///
/// Closed set: every match over it is exhaustive, so a new variant has to be
/// routed in [`crate::usecases::input_resolver`] before the crate compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequiredInput {
    SecretPassphrase { symmetric: bool },
    HardwareToken { purpose: HardwareTokenPurpose },
}

impl fmt::Display for RequiredInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredInput::SecretPassphrase { symmetric: true } => f.write_str("symmetric passphrase"),
            RequiredInput::SecretPassphrase { symmetric: false } => f.write_str("key passphrase"),
            RequiredInput::HardwareToken { purpose } => write!(f, "hardware token ({})", purpose),
        }
    }
}

/// Fixed identifier a collection outcome is delivered back under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestCode {
    Passphrase,
    Token,
}

pub const REQUEST_PASSPHRASE: RequestCode = RequestCode::Passphrase;
pub const REQUEST_TOKEN: RequestCode = RequestCode::Token;

impl RequestCode {
    /// Numeric form, stable across releases.
    pub fn as_u32(self) -> u32 {
        match self {
            RequestCode::Passphrase => 0x0000_8001,
            RequestCode::Token => 0x0000_8002,
        }
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestCode::Passphrase => write!(f, "REQUEST_PASSPHRASE({:#06x})", self.as_u32()),
            RequestCode::Token => write!(f, "REQUEST_TOKEN({:#06x})", self.as_u32()),
        }
    }
}

/// Request handed to the secret-entry collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassphraseRequest {
    pub code: RequestCode,
    pub symmetric: bool,
}

impl PassphraseRequest {
    pub fn descriptor(&self) -> RequiredInput {
        RequiredInput::SecretPassphrase {
            symmetric: self.symmetric,
        }
    }
}

/// Request handed to the token-interaction collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRequest {
    pub code: RequestCode,
    pub purpose: HardwareTokenPurpose,
}

impl TokenRequest {
    pub fn descriptor(&self) -> RequiredInput {
        RequiredInput::HardwareToken {
            purpose: self.purpose,
        }
    }
}

/// A passphrase collected from the user. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

/// Bytes returned by a hardware token after the user interacted with it. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct TokenResponse {
    #[zeroize(skip)]
    purpose: HardwareTokenPurpose,
    data: Vec<u8>,
}

impl TokenResponse {
    pub fn new(purpose: HardwareTokenPurpose, data: impl Into<Vec<u8>>) -> Self {
        Self {
            purpose,
            data: data.into(),
        }
    }

    pub fn purpose(&self) -> HardwareTokenPurpose {
        self.purpose
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("purpose", &self.purpose)
            .field("len", &self.data.len())
            .finish()
    }
}

/// One piece of material obtained by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoInputItem {
    Passphrase(Passphrase),
    TokenResponse(TokenResponse),
}

/// Accumulated secrets/token responses for one Attempt. Starts empty, grows by one per resumption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CryptoInputMaterial {
    items: Vec<CryptoInputItem>,
}

impl CryptoInputMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, item: CryptoInputItem) -> Self {
        self.push(item);
        self
    }

    pub fn push(&mut self, item: CryptoInputItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &CryptoInputItem> {
        self.items.iter()
    }

    /// Most recently collected passphrase, if any.
    pub fn passphrase(&self) -> Option<&Passphrase> {
        self.items.iter().rev().find_map(|item| match item {
            CryptoInputItem::Passphrase(p) => Some(p),
            CryptoInputItem::TokenResponse(_) => None,
        })
    }

    /// Most recent token response collected for `purpose`, if any.
    pub fn token_response(&self, purpose: HardwareTokenPurpose) -> Option<&TokenResponse> {
        self.items.iter().rev().find_map(|item| match item {
            CryptoInputItem::TokenResponse(t) if t.purpose() == purpose => Some(t),
            _ => None,
        })
    }
}

/// Human-readable reason an operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Final or pending result of one submission. Only `Pending` is non-terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<S> {
    Success(S),
    Error(Diagnostic),
    Pending(RequiredInput),
}

/// Advisory progress report. Never affects control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub message: String,
    pub current: u64,
    pub max: u64,
}

/// What an executor emits on the Attempt's channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind<S> {
    Progress(ProgressUpdate),
    Result(OperationResult<S>),
}

/// An event tagged with the submission that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorEvent<S> {
    pub submission: u64,
    pub kind: EventKind<S>,
}

impl<S> ExecutorEvent<S> {
    pub fn is_progress(&self) -> bool {
        matches!(self.kind, EventKind::Progress(_))
    }
}

/// What a collection collaborator reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome<T> {
    Obtained(T),
    Cancelled,
}

impl<T> CollectionOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CollectionOutcome<U> {
        match self {
            CollectionOutcome::Obtained(v) => CollectionOutcome::Obtained(f(v)),
            CollectionOutcome::Cancelled => CollectionOutcome::Cancelled,
        }
    }
}

/// Rendering hint for the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    /// Determinate bar (current/max).
    #[default]
    Horizontal,
    /// Indeterminate spinner.
    Spinner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_codes_are_fixed() {
        assert_eq!(REQUEST_PASSPHRASE.as_u32(), 0x8001);
        assert_eq!(REQUEST_TOKEN.as_u32(), 0x8002);
    }

    #[test]
    fn test_material_returns_latest_items() {
        let material = CryptoInputMaterial::new()
            .with(CryptoInputItem::Passphrase(Passphrase::new("first")))
            .with(CryptoInputItem::TokenResponse(TokenResponse::new(
                HardwareTokenPurpose::Sign,
                b"cccc".to_vec(),
            )))
            .with(CryptoInputItem::Passphrase(Passphrase::new("second")));

        assert_eq!(material.len(), 3);
        assert_eq!(material.passphrase().map(Passphrase::expose), Some("second"));
        assert!(material.token_response(HardwareTokenPurpose::Sign).is_some());
        assert!(material.token_response(HardwareTokenPurpose::Decrypt).is_none());
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let item = CryptoInputItem::Passphrase(Passphrase::new("hunter2"));
        let rendered = format!("{:?}", item);
        assert!(!rendered.contains("hunter2"));

        let token = TokenResponse::new(HardwareTokenPurpose::Decrypt, b"otp-bytes".to_vec());
        assert!(!format!("{:?}", token).contains("otp-bytes"));
    }
}
