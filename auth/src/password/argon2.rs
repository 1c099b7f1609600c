use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Argon2id time cost (iterations).
const TIME_COST: u32 = 1;

/// Argon2id memory cost in KiB (64 MiB).
const MEMORY_COST: u32 = 64 * 1024;

/// Argon2id lanes.
const PARALLELISM: u32 = 4;

/// Length in bytes of every derived hash.
pub const KEY_LENGTH: usize = 32;

/// Length in bytes of every generated salt.
pub const SALT_LENGTH: usize = 16;

/// Raw output of a password hash: derived key plus the salt it was derived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

/// Password hashing implementation.
///
/// Derives fixed-length Argon2id keys with fixed parameters, storing hash and
/// salt as separate raw byte strings rather than a PHC string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PasswordDigest with a `KEY_LENGTH` hash and a `SALT_LENGTH` salt
    ///
    /// # Errors
    /// * `EmptyInput` - Password is empty
    /// * `HashingFailed` - Salt generation or key derivation failed
    pub fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyInput);
        }

        let mut salt = vec![0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(format!("Failed to generate salt: {}", e)))?;

        let hash = derive(password, &salt)?;

        Ok(PasswordDigest { hash, salt })
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// The comparison runs in constant time with respect to the hash contents.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `salt` - Salt stored alongside the hash
    /// * `expected_hash` - Stored hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidInputShape` - Salt or hash length differs from what `hash` produces
    /// * `EmptyInput` - Password is empty
    /// * `HashingFailed` - Key derivation failed
    pub fn verify(
        &self,
        password: &str,
        salt: &[u8],
        expected_hash: &[u8],
    ) -> Result<bool, PasswordError> {
        if salt.len() != SALT_LENGTH {
            return Err(PasswordError::InvalidInputShape {
                field: "salt",
                expected: SALT_LENGTH,
                actual: salt.len(),
            });
        }

        if expected_hash.len() != KEY_LENGTH {
            return Err(PasswordError::InvalidInputShape {
                field: "hash",
                expected: KEY_LENGTH,
                actual: expected_hash.len(),
            });
        }

        if password.is_empty() {
            return Err(PasswordError::EmptyInput);
        }

        let computed = derive(password, salt)?;

        Ok(bool::from(computed.ct_eq(expected_hash)))
    }
}

fn derive(password: &str, salt: &[u8]) -> Result<Vec<u8>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(KEY_LENGTH))
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = vec![0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut output)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(output)
}
