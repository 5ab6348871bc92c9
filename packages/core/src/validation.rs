// ABOUTME: Input validation for signup and chat payloads
// ABOUTME: Rejects malformed emails, short passwords, and blank usernames or messages

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::constants::MIN_PASSWORD_LENGTH;

/// Maximum accepted length for a single chat message
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Maximum accepted username length
pub const MAX_USERNAME_LENGTH: usize = 64;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email regex is valid");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters", min = MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds {max} characters", max = MAX_USERNAME_LENGTH)]
    UsernameTooLong,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message exceeds {max} characters", max = MAX_MESSAGE_LENGTH)]
    MessageTooLong,
}

/// Validate and normalize an email address (trimmed, lowercased)
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidEmail(trimmed.to_string()));
    }
    Ok(trimmed.to_lowercase())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    Ok(trimmed.to_string())
}

/// Validate a chat message; the content itself is kept verbatim
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(
            validate_email("  Demo@RealWorldEd.com ").unwrap(),
            "demo@realworlded.com"
        );
    }

    #[test]
    fn test_invalid_emails_are_rejected() {
        for email in ["", "plainaddress", "missing@tld", "@example.com", "a b@example.com"] {
            assert!(validate_email(email).is_err(), "accepted {email:?}");
        }
    }

    #[test]
    fn test_password_minimum_length() {
        assert_eq!(validate_password("12345"), Err(ValidationError::PasswordTooShort));
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_blank_username_is_rejected() {
        assert_eq!(validate_username("   "), Err(ValidationError::EmptyUsername));
        assert_eq!(validate_username(" alice ").unwrap(), "alice");
        assert_eq!(
            validate_username(&"x".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_message_validation() {
        assert_eq!(validate_message(" \n\t"), Err(ValidationError::EmptyMessage));
        assert!(validate_message("I'm ready to pitch").is_ok());
        assert_eq!(
            validate_message(&"a".repeat(MAX_MESSAGE_LENGTH + 1)),
            Err(ValidationError::MessageTooLong)
        );
    }
}
