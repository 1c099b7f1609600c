use std::sync::Arc;
use std::time::Duration;

use email_address::EmailAddress;
use tonic::Status;

use super::to_status;
use super::with_deadline;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: Arc<S>,
    timeout: Duration,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    if request.email.is_empty() {
        return Err(Status::invalid_argument("email is required"));
    }
    if request.password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }
    if !EmailAddress::is_valid(&request.email) {
        return Err(Status::invalid_argument("invalid email"));
    }

    with_deadline(timeout, service.register(&request.email, &request.password))
        .await
        .map(|user_id| RegisterResponse { user_id: user_id.0 })
        .map_err(|e| to_status(&e, "failed to register user"))
}
