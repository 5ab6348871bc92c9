// ABOUTME: Error types for hashing and token handling
// ABOUTME: Keeps crypto library errors out of the public surface

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Failed to generate random data")]
    RandomGeneration,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token could not be created: {0}")]
    TokenCreation(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<argon2::password_hash::Error> for SecurityError {
    fn from(err: argon2::password_hash::Error) -> Self {
        SecurityError::Hashing(err.to_string())
    }
}
