use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::register;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

/// gRPC front of the authentication service.
///
/// Every call is bounded by `operation_timeout`.
pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
    operation_timeout: Duration,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>, operation_timeout: Duration) -> Self {
        Self {
            service,
            operation_timeout,
        }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> Auth for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(
            Arc::clone(&self.service),
            self.operation_timeout,
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(
            Arc::clone(&self.service),
            self.operation_timeout,
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let response = is_admin::is_admin(
            Arc::clone(&self.service),
            self.operation_timeout,
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }
}
