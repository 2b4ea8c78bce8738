//! Request extractors that keep the API error contract.
//!
//! ERROR HANDLING
//! ==============
//! Axum's stock `Json`/`Path`/`Query` rejections answer with `text/plain`
//! and, for body data errors, 422. These wrappers turn every rejection into
//! a 400 with the usual `{"error": "..."}` body, leaving 422 to mean an
//! unknown referenced sprint or assignee.

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::Json;
use serde::de::DeserializeOwned;

use super::{ApiError, api_error};

/// JSON request body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

/// Query string.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(api_error(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(api_error(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(api_error(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}
