//! Errores específicos del core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::Role;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EngineError {
    #[error("context already cancelled")] ContextCancelled,
    #[error("context deadline already exceeded")] DeadlineExceeded,
    #[error("{role} failure: {reason}")] HookFailed { role: Role, reason: String },
    #[error("run aborted: setup failed previously")] SetupAborted,
    #[error("run aborted: finish already ran")] RunFinished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_failed_names_the_role() {
        let err = EngineError::HookFailed { role: Role::BeforeTest,
                                            reason: "boom".into() };
        assert_eq!(err.to_string(), "before-test failure: boom");
    }

    #[test]
    fn errors_roundtrip_through_json() {
        let err = EngineError::HookFailed { role: Role::Finish,
                                            reason: "x".into() };
        let json = serde_json::to_string(&err).unwrap();
        let back: EngineError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
