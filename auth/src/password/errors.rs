use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    EmptyInput,

    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidInputShape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
