use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use chrono::Duration;

use crate::domain::auth::models::App;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::TokenIssuer;

/// RS256 token issuer signing with the private key stored on each app.
///
/// The key is parsed on every call; nothing is cached between logins.
#[derive(Debug, Clone, Default)]
pub struct JwtTokenIssuer {
    handler: JwtHandler,
}

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self {
            handler: JwtHandler::new(),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_login(user.id.0, user.email.as_str(), app.id.0, ttl)?;

        let token = self.handler.sign_with_pem(&claims, &app.private_key)?;

        tracing::debug!(user_id = %user.id, app_id = %app.id, "Token generated");

        Ok(token)
    }
}
