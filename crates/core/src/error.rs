//! Domain error model.

use thiserror::Error;

/// Result type used across the analytics crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only client-input problems live here. The computations themselves are
/// total over well-formed input and never fail for data reasons (malformed
/// timestamps, unknown categories and zero budgets all have defined results).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. an inconsistent threshold set).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A caller-supplied parameter is outside its allowed range.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
