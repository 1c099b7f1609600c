pub mod jwt;

pub use jwt::JwtTokenIssuer;
