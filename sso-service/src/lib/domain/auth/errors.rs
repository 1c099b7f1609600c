use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error reported by Account Directory implementations.
///
/// Never crosses the service boundary: `AuthService` translates every variant
/// into an `AuthError`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("App not found: {0}")]
    AppNotFound(i32),

    #[error("Storage operation timed out")]
    DeadlineExceeded,

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for all authentication operations.
///
/// Callers match on [`AuthError::kind`], which skips the operation context added
/// by [`AuthError::wrap`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid app id")]
    InvalidAppId,

    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{operation}: {source}")]
    Context {
        operation: &'static str,
        #[source]
        source: Box<AuthError>,
    },
}

impl AuthError {
    /// Attach the name of the operation the error surfaced from.
    pub fn wrap(self, operation: &'static str) -> Self {
        AuthError::Context {
            operation,
            source: Box::new(self),
        }
    }

    /// The underlying error, with all operation context removed.
    pub fn kind(&self) -> &AuthError {
        let mut current = self;
        while let AuthError::Context { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserExists(_) => AuthError::UserExists,
            StorageError::UserNotFound(_) => AuthError::UserNotFound,
            StorageError::AppNotFound(_) => AuthError::InvalidAppId,
            StorageError::DeadlineExceeded => AuthError::DeadlineExceeded,
            StorageError::Database(message) => AuthError::Internal(message),
        }
    }
}
