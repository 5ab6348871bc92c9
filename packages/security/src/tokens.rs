// ABOUTME: HS256 bearer tokens identifying a user
// ABOUTME: Issues tokens with a configurable lifetime and validates signature and expiry

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::SecurityError;

/// Token payload; `sub` carries the user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, SecurityError> {
        self.sub
            .parse()
            .map_err(|_| SecurityError::InvalidToken("subject is not a user id".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<IssuedToken, SecurityError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SecurityError::TokenCreation(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: "bearer",
        })
    }

    /// Validate signature and expiry, returning the user id from `sub`
    pub fn verify(&self, token: &str) -> Result<i64, SecurityError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => SecurityError::TokenExpired,
                _ => SecurityError::InvalidToken(e.to_string()),
            }
        })?;

        data.claims.user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_issued_token_round_trips_user_id() {
        let issuer = TokenIssuer::new("test-secret", 30);
        let token = issuer.issue(42).unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(issuer.verify(&token.access_token).unwrap(), 42);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = TokenIssuer::new("secret-a", 30).issue(7).unwrap();
        let err = TokenIssuer::new("secret-b", 30)
            .verify(&token.access_token)
            .unwrap_err();

        assert!(matches!(err, SecurityError::InvalidToken(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default validation leeway
        let issuer = TokenIssuer::new("test-secret", -10);
        let token = issuer.issue(7).unwrap();

        assert!(matches!(
            issuer.verify(&token.access_token),
            Err(SecurityError::TokenExpired)
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", 30);
        assert!(matches!(
            issuer.verify("not.a.jwt"),
            Err(SecurityError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_non_numeric_subject_is_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = TokenIssuer::new("test-secret", 30).verify(&token).unwrap_err();
        assert!(matches!(err, SecurityError::InvalidToken(_)));
    }
}
