//! Credential adapters: Argon2 password hashing and HS256 session tokens.

mod password;
mod token;

pub use password::Argon2PasswordHasher;
pub use token::JwtTokenIssuer;
