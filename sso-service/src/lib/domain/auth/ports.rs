use async_trait::async_trait;
use auth::JwtError;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication service operations, consumed by transports.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Authenticate credentials and issue a token for an app.
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `password` - Plaintext password
    /// * `app_id` - App the token is issued for
    ///
    /// # Returns
    /// Signed RS256 token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `InvalidAppId` - Credentials valid but app is not provisioned
    /// * `Token` - Token issuance failed
    /// * `DeadlineExceeded` - Directory call timed out
    /// * `Internal` - Directory failure
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;

    /// Create a new account.
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `password` - Plaintext password (hashed before storage)
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `Password` - Password could not be hashed (e.g. empty)
    /// * `UserExists` - Email is already registered
    /// * `DeadlineExceeded` - Directory call timed out
    /// * `Internal` - Directory failure
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Report whether a user holds the admin role.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `DeadlineExceeded` - Directory call timed out
    /// * `Internal` - Directory failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Account Directory write side.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Identifier assigned by storage
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn save_user(
        &self,
        email: &str,
        password_hash: &[u8],
        password_salt: &[u8],
    ) -> Result<UserId, StorageError>;
}

/// Account Directory user read side.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve user by email.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError>;

    /// Retrieve the admin flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `Database` - Storage operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Account Directory app read side.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Retrieve app, including its key pair, by id.
    ///
    /// # Errors
    /// * `AppNotFound` - App is not provisioned
    /// * `Database` - Storage operation failed
    async fn find_app_by_id(&self, app_id: AppId) -> Result<App, StorageError>;
}

/// Issues signed tokens for a user and app.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Build and sign a token for `user` scoped to `app`, expiring after `ttl`.
    ///
    /// # Errors
    /// * `KeyUnavailable` - App private key is malformed
    /// * `SigningFailed` - Signing failed
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError>;
}
