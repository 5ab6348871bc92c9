// ABOUTME: Password hashing with Argon2id
// ABOUTME: Hashes are self-describing PHC strings carrying their own salt and parameters

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::SecurityError;

const SALT_LEN: usize = 16;

fn generate_salt() -> Result<SaltString, SecurityError> {
    let mut bytes = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| SecurityError::RandomGeneration)?;
    Ok(SaltString::encode_b64(&bytes)?)
}

/// Hash a plaintext password into a PHC string
pub fn hash_password(password: &str) -> Result<String, SecurityError> {
    let salt = generate_salt()?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string.
///
/// A malformed stored hash is treated as a mismatch so callers can answer
/// every login failure the same way.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
