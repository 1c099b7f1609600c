pub mod argon2;
pub mod errors;

pub use self::argon2::PasswordDigest;
pub use self::argon2::PasswordHasher;
pub use self::argon2::KEY_LENGTH;
pub use self::argon2::SALT_LENGTH;
pub use errors::PasswordError;
