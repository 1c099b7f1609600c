use thiserror::Error;

/// Error type for RSA key generation and parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    #[error("Key generation failed: {0}")]
    GenerationFailed(String),

    #[error("Key encoding failed: {0}")]
    EncodingFailed(String),
}
