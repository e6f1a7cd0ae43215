use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::common::ApiError;

/// JSON request body whose rejections use the API error shape
///
/// Well-formed JSON of the wrong shape is unprocessable (422); anything
/// else (bad syntax, missing content type) is a bad request (400).
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(err)) => {
                debug!(error = %err, "Unprocessable request body");
                Err(ApiError::Unprocessable)
            }
            Err(err) => {
                debug!(error = %err, "Malformed request body");
                Err(ApiError::BadRequest)
            }
        }
    }
}

/// Integer `{id}` path segment; anything else does not name a drink (404)
///
/// Handlers take this before `RequirePermission`, so `/drinks/abc` is a 404
/// even without a token, as if the route had not matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for DrinkId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i32>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| DrinkId(id))
            .map_err(|err| {
                debug!(error = %err, "Path does not name a drink");
                ApiError::NotFound
            })
    }
}
