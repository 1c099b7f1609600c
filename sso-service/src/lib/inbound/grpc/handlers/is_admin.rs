use std::sync::Arc;
use std::time::Duration;

use tonic::Status;

use super::to_status;
use super::with_deadline;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: Arc<S>,
    timeout: Duration,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    if request.user_id == 0 {
        return Err(Status::invalid_argument("user_id is required"));
    }

    with_deadline(timeout, service.is_admin(UserId(request.user_id)))
        .await
        .map(|is_admin| IsAdminResponse { is_admin })
        .map_err(|e| to_status(&e, "failed to check admin status"))
}
