// ABOUTME: Bearer-token extractor for authenticated routes
// ABOUTME: Resolves the Authorization header to the signed-in user

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use realworlded_storage::User;
use tracing::debug;

use crate::{AppError, AppState};

const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// The authenticated user for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub user: User,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

        let token = bearer_token(header).ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

        let user_id = state.tokens.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {}", e);
            AppError::unauthorized(CREDENTIALS_ERROR)
        })?;

        let user = state
            .db
            .user_storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(CREDENTIALS_ERROR))?;

        Ok(Self { id: user.id, user })
    }
}

/// Token part of a `Bearer <token>` header; the scheme is case-insensitive
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
