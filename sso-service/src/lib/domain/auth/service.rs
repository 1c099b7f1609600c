use std::sync::Arc;

use async_trait::async_trait;
use auth::password::KEY_LENGTH;
use auth::password::SALT_LENGTH;
use auth::PasswordDigest;
use auth::PasswordHasher;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

// Record verified against when the email is unknown; it matches no password.
const DECOY_SALT: [u8; SALT_LENGTH] = [0u8; SALT_LENGTH];
const DECOY_HASH: [u8; KEY_LENGTH] = [0u8; KEY_LENGTH];

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection. This is
/// the only place storage errors are translated into domain errors.
pub struct AuthService<US, UP, AP, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    TI: TokenIssuer,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    token_issuer: Arc<TI>,
    password_hasher: PasswordHasher,
    token_ttl: Duration,
}

impl<US, UP, AP, TI> AuthService<US, UP, AP, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - Directory write side
    /// * `user_provider` - Directory user read side
    /// * `app_provider` - Directory app read side
    /// * `token_issuer` - Token signing implementation
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        token_issuer: Arc<TI>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_issuer,
            password_hasher: PasswordHasher::new(),
            token_ttl,
        }
    }

    // Argon2 is CPU and memory bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<PasswordDigest, AuthError> {
        let hasher = self.password_hasher;
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify_password(
        &self,
        password: &str,
        salt: &[u8],
        hash: &[u8],
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;
        let password = password.to_owned();
        let salt = salt.to_vec();
        let hash = hash.to_vec();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &salt, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(AuthError::from)
    }
}

#[async_trait]
impl<US, UP, AP, TI> AuthServicePort for AuthService<US, UP, AP, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    TI: TokenIssuer,
{
    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        const OP: &str = "auth.login";

        tracing::info!(op = OP, email = %email, app_id = %app_id, "Attempting to log in user");

        let user = match self.user_provider.find_user_by_email(email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound(_)) => {
                tracing::warn!(op = OP, email = %email, "User not found");
                let _ = self
                    .verify_password(password, &DECOY_SALT, &DECOY_HASH)
                    .await;
                return Err(AuthError::InvalidCredentials.wrap(OP));
            }
            Err(e) => {
                tracing::error!(op = OP, error = %e, "Failed to get user");
                return Err(AuthError::from(e).wrap(OP));
            }
        };

        let matches = self
            .verify_password(password, &user.password_salt, &user.password_hash)
            .await
            .map_err(|e| {
                tracing::error!(op = OP, user_id = %user.id, error = %e, "Failed to verify password");
                e.wrap(OP)
            })?;
        if !matches {
            tracing::info!(op = OP, user_id = %user.id, "Invalid credentials");
            return Err(AuthError::InvalidCredentials.wrap(OP));
        }

        let app = match self.app_provider.find_app_by_id(app_id).await {
            Ok(app) => app,
            Err(StorageError::AppNotFound(_)) => {
                tracing::warn!(op = OP, app_id = %app_id, "App not found");
                return Err(AuthError::InvalidAppId.wrap(OP));
            }
            Err(e) => {
                tracing::error!(op = OP, error = %e, "Failed to get app");
                return Err(AuthError::from(e).wrap(OP));
            }
        };

        let token = self
            .token_issuer
            .issue(&user, &app, self.token_ttl)
            .map_err(|e| {
                tracing::error!(op = OP, app_id = %app.id, error = %e, "Failed to create token");
                AuthError::from(e).wrap(OP)
            })?;

        tracing::info!(op = OP, user_id = %user.id, app_id = %app.id, "User logged in successfully");

        Ok(token)
    }

    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        const OP: &str = "auth.register";

        tracing::info!(op = OP, email = %email, "Registering new user");

        let digest = self.hash_password(password).await.map_err(|e| {
            tracing::error!(op = OP, error = %e, "Failed to hash password");
            e.wrap(OP)
        })?;

        let user_id = self
            .user_saver
            .save_user(email, &digest.hash, &digest.salt)
            .await
            .map_err(|e| {
                match &e {
                    StorageError::UserExists(_) => {
                        tracing::warn!(op = OP, email = %email, "User already exists")
                    }
                    _ => tracing::error!(op = OP, error = %e, "Failed to save user"),
                }
                AuthError::from(e).wrap(OP)
            })?;

        tracing::info!(op = OP, user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        const OP: &str = "auth.is_admin";

        tracing::info!(op = OP, user_id = %user_id, "Checking if user is admin");

        let is_admin = self.user_provider.is_admin(user_id).await.map_err(|e| {
            match &e {
                StorageError::UserNotFound(_) => {
                    tracing::warn!(op = OP, user_id = %user_id, "User not found")
                }
                _ => tracing::error!(op = OP, error = %e, "Failed to check admin status"),
            }
            AuthError::from(e).wrap(OP)
        })?;

        tracing::info!(op = OP, user_id = %user_id, is_admin, "Checked admin status");

        Ok(is_admin)
    }
}
