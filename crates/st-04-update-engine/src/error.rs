//! Error types for the update engine

use thiserror::Error;

/// Engine construction errors. A running tick never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid engine configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
