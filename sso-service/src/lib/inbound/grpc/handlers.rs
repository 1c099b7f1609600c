use std::future::Future;
use std::time::Duration;

use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

/// Run a core operation under the transport deadline.
///
/// # Errors
/// * `DeadlineExceeded` - The operation did not finish within `timeout`
pub async fn with_deadline<T, F>(timeout: Duration, operation: F) -> Result<T, AuthError>
where
    F: Future<Output = Result<T, AuthError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(AuthError::DeadlineExceeded),
    }
}

/// Map an authentication error onto a gRPC status.
///
/// Anything that is not a client-facing failure is reported as `Internal` with
/// `internal_message`, so storage and key details never reach the caller.
pub fn to_status(err: &AuthError, internal_message: &str) -> Status {
    match err.kind() {
        AuthError::InvalidCredentials => Status::invalid_argument("invalid credentials"),
        AuthError::InvalidAppId => Status::invalid_argument("invalid app id"),
        AuthError::UserExists => Status::already_exists("user already exists"),
        AuthError::UserNotFound => Status::not_found("user not found"),
        AuthError::DeadlineExceeded => Status::deadline_exceeded("operation timeout"),
        _ => {
            tracing::error!(error = %err, "Request failed");
            Status::internal(internal_message)
        }
    }
}
