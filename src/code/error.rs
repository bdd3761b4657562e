//! Error types for code derivation and parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid property code '{0}'")]
    InvalidPropertyCode(String),

    #[error("Invalid {kind} code '{code}' for '{name}'")]
    InvalidMapping {
        kind: &'static str,
        name: String,
        code: String,
    },
}

impl CodeError {
    /// Create an invalid input error with a message
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CodeError::InvalidInput(msg.into())
    }
}
