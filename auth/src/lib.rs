//! Credential primitives for the SSO service
//!
//! Provides the security-sensitive building blocks the service composes:
//! - Password hashing (Argon2id, raw hash + salt)
//! - RSA key pair generation and strict PEM parsing
//! - RS256 JWT signing and verification
//!
//! The service defines its own ports and adapts these implementations, so the
//! primitives stay free of storage and transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &digest.salt, &digest.hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Signing and verifying tokens
//! ```
//! use auth::{generate_key_pair, Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let keys = generate_key_pair(2048).unwrap();
//! let handler = JwtHandler::new();
//!
//! let claims = Claims::for_login(7, "a@x.com", 1, Duration::hours(1)).unwrap();
//! let token = handler.sign_with_pem(&claims, &keys.private_key).unwrap();
//!
//! let decoded: Claims = handler.verify_with_pem(&token, &keys.public_key).unwrap();
//! assert_eq!(decoded.uid, 7);
//! ```

pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use keys::generate_key_pair;
pub use keys::parse_private_key;
pub use keys::parse_public_key;
pub use keys::KeyError;
pub use keys::KeyPair;
pub use keys::SigningKey;
pub use keys::VerifyingKey;
pub use password::PasswordDigest;
pub use password::PasswordError;
pub use password::PasswordHasher;
