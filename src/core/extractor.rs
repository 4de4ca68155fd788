use axum::{
    body::Body,
    extract::{rejection::FormRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Form,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Form extractor that reports malformed bodies through `AppError`
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(form_rejection_error(rejection)),
        }
    }
}

fn form_rejection_error(rejection: FormRejection) -> AppError {
    let message = match rejection {
        FormRejection::InvalidFormContentType(_) => {
            "Expected an application/x-www-form-urlencoded body".to_string()
        }
        FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
        FormRejection::FailedToDeserializeFormBody(err) => format!("Invalid form data: {}", err),
        _ => "Failed to parse form body".to_string(),
    };
    AppError::BadRequest(message)
}

/// Numeric primary key taken from the `{id}` path segment.
///
/// A segment that is not a positive integer cannot name a row, so it is
/// reported as `NotFound` rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Record not found".to_string()))?;

        parse_id(&raw)
            .map(EntityId)
            .ok_or_else(|| AppError::NotFound(format!("Record '{}' not found", raw)))
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
