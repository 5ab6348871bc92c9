// ABOUTME: HTTP request handlers for signup, login, and the current-user profile
// ABOUTME: Issues bearer tokens and keeps password hashes out of every response

use axum::{extract::State, response::IntoResponse};
use realworlded_core::{validate_email, validate_password, validate_username};
use realworlded_security::{hash_password, verify_password};
use realworlded_storage::{NewUser, PublicUser, StorageError};
use serde::Deserialize;
use tracing::info;

use super::auth::CurrentUser;
use super::response::{created, ok};
use crate::{ApiJson, ApiResult, AppError, AppState};

const EMAIL_TAKEN: &str = "Email already registered";
const USERNAME_TAKEN: &str = "Username already taken";
const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// Request body for creating an account
#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// Register a new user and sign them in
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = validate_email(&request.email)?;
    let username = validate_username(&request.username)?;
    validate_password(&request.password)?;

    let users = &state.db.user_storage;
    if users.email_exists(&email).await? {
        return Err(AppError::Duplicate(EMAIL_TAKEN.to_string()));
    }
    if users.username_exists(&username).await? {
        return Err(AppError::Duplicate(USERNAME_TAKEN.to_string()));
    }

    let password = request.password;
    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(AppError::internal)??;

    let new_user = NewUser {
        email,
        username,
        hashed_password,
        full_name: request.full_name.filter(|name| !name.trim().is_empty()),
    };

    let user = users.create_user(new_user).await.map_err(|e| match e {
        StorageError::Duplicate("email") => AppError::Duplicate(EMAIL_TAKEN.to_string()),
        StorageError::Duplicate(_) => AppError::Duplicate(USERNAME_TAKEN.to_string()),
        other => AppError::Storage(other),
    })?;

    info!("Registered user {} ({})", user.id, user.username);

    let token = state.tokens.issue(user.id)?;
    Ok(created(token))
}

/// Request body for signing in
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Exchange email and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = request.email.trim().to_lowercase();

    let user = state
        .db
        .user_storage
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

    let password = request.password;
    let stored_hash = user.hashed_password.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(AppError::internal)?;

    if !verified {
        return Err(AppError::unauthorized(BAD_CREDENTIALS));
    }

    info!("User {} logged in", user.id);

    let token = state.tokens.issue(user.id)?;
    Ok(ok(token))
}

/// Profile of the signed-in user
pub async fn me(current: CurrentUser) -> ApiResult<impl IntoResponse> {
    Ok(ok(PublicUser::from(current.user)))
}
