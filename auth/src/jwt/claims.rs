use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an app-scoped login token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub uid: i64,

    /// User email at issue time
    pub email: String,

    /// App the token was issued for
    pub app_id: i32,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a login, expiring `ttl` after now.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Target app identifier
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry falls outside the representable time range
    pub fn for_login(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        Self::issued_at(Utc::now(), uid, email, app_id, ttl)
    }

    /// Create claims with an explicit issue time.
    pub fn issued_at(
        now: DateTime<Utc>,
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::SigningFailed(format!("Token lifetime out of range: {}", ttl))
        })?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_login() {
        let claims = Claims::for_login(7, "a@x.com", 1, Duration::hours(1)).unwrap();

        assert_eq!(claims.uid, 7);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.app_id, 1);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_issued_at() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::issued_at(now, 1, "a@x.com", 2, Duration::seconds(90)).unwrap();

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_090);
    }

    #[test]
    fn test_issued_at_rejects_out_of_range_lifetime() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let result = Claims::issued_at(
            now,
            1,
            "a@x.com",
            1,
            Duration::seconds(10_000_000_000_000),
        );

        assert!(matches!(result, Err(JwtError::SigningFailed(_))));
    }

    #[test]
    fn test_is_expired() {
        let now = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = Claims::issued_at(now, 1, "a@x.com", 1, Duration::seconds(0)).unwrap();

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_serialized_field_names() {
        let now = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = Claims::issued_at(now, 7, "a@x.com", 1, Duration::seconds(60)).unwrap();

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["uid"], 7);
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["app_id"], 1);
        assert_eq!(value["exp"], 1060);
        assert_eq!(value["iat"], 1000);
    }
}
