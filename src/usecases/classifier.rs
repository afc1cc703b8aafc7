//! Splits executor results into "Attempt is over" and "Attempt needs more input".

use crate::domain::{Diagnostic, OperationResult, RequiredInput};

/// How an Attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination<S> {
    Success(S),
    Error(Diagnostic),
    /// The user declined to supply the requested input.
    Cancelled,
}

impl<S> Termination<S> {
    pub fn label(&self) -> &'static str {
        match self {
            Termination::Success(_) => "success",
            Termination::Error(_) => "error",
            Termination::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<S> {
    Terminal(Termination<S>),
    Pending(RequiredInput),
}

pub fn classify<S>(result: OperationResult<S>) -> Classification<S> {
    match result {
        OperationResult::Success(payload) => Classification::Terminal(Termination::Success(payload)),
        OperationResult::Error(diagnostic) => {
            Classification::Terminal(Termination::Error(diagnostic))
        }
        OperationResult::Pending(required) => Classification::Pending(required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HardwareTokenPurpose;

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert_eq!(
            classify(OperationResult::Success(7)),
            Classification::Terminal(Termination::Success(7))
        );
        assert_eq!(
            classify::<()>(OperationResult::Error(Diagnostic::new("bad password"))),
            Classification::Terminal(Termination::Error(Diagnostic::new("bad password")))
        );

        let required = RequiredInput::HardwareToken {
            purpose: HardwareTokenPurpose::Decrypt,
        };
        assert_eq!(
            classify::<()>(OperationResult::Pending(required)),
            Classification::Pending(required)
        );
    }
}
