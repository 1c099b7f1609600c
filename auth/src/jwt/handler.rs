use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use crate::keys::parse_private_key;
use crate::keys::parse_public_key;
use crate::keys::SigningKey;
use crate::keys::VerifyingKey;

/// JWT token handler for signing and verifying tokens.
///
/// Generic over the claims type. Uses RS256 (RSA PKCS#1 v1.5 with SHA-256): tokens
/// are signed with a private key and verified with the matching public key, so
/// relying parties never hold signing material.
#[derive(Debug, Clone, Copy)]
pub struct JwtHandler {
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new RS256 JWT handler.
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::RS256,
        }
    }

    /// Sign claims into a JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    /// * `key` - Parsed RSA private key
    ///
    /// # Returns
    /// Signed JWT token string
    ///
    /// # Errors
    /// * `KeyUnavailable` - Key could not be converted for signing
    /// * `SigningFailed` - Token encoding or signing failed
    pub fn sign<T: Serialize>(&self, claims: &T, key: &SigningKey) -> Result<String, JwtError> {
        let encoding_key = key.encoding_key()?;
        let header = Header::new(self.algorithm);

        encode(&header, claims, &encoding_key).map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Parse a PEM private key and sign claims with it.
    ///
    /// # Errors
    /// * `KeyUnavailable` - Private key text is malformed
    /// * `SigningFailed` - Token encoding or signing failed
    pub fn sign_with_pem<T: Serialize>(
        &self,
        claims: &T,
        private_key_pem: &str,
    ) -> Result<String, JwtError> {
        let key = parse_private_key(private_key_pem)?;
        self.sign(claims, &key)
    }

    /// Verify a token signature and expiration, and decode its claims.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    /// * `key` - Parsed RSA public key of the issuing app
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `TokenExpired` - Token `exp` is in the past
    /// * `InvalidToken` - Token signature is invalid or malformed
    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        key: &VerifyingKey,
    ) -> Result<T, JwtError> {
        let decoding_key = key.decoding_key()?;
        let validation = Validation::new(self.algorithm);

        decode::<T>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Parse a PEM public key and verify a token with it.
    pub fn verify_with_pem<T: DeserializeOwned>(
        &self,
        token: &str,
        public_key_pem: &str,
    ) -> Result<T, JwtError> {
        let key = parse_public_key(public_key_pem)?;
        self.verify(token, &key)
    }
}

impl Default for JwtHandler {
    fn default() -> Self {
        Self::new()
    }
}
