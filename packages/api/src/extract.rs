// ABOUTME: JSON body extractor that rejects with the API error envelope
// ABOUTME: Wraps axum's Json so malformed or missing bodies map to AppError

use axum::{
    extract::{FromRequest, Request},
    Json,
};

use crate::AppError;

/// `Json<T>` whose rejection is an [`AppError`] instead of axum's plain-text body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
