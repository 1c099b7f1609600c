pub mod errors;
pub mod rsa;

pub use self::rsa::generate_key_pair;
pub use self::rsa::parse_private_key;
pub use self::rsa::parse_public_key;
pub use self::rsa::KeyPair;
pub use self::rsa::SigningKey;
pub use self::rsa::VerifyingKey;
pub use errors::KeyError;
