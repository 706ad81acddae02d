//! Model validation errors.

use thiserror::Error;

/// Errors raised when parsing or validating model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
