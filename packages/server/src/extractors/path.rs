use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Record identifier taken from the `{id}` path segment.
///
/// A segment that is not a valid identifier is rejected as `MalformedId` (400),
/// which keeps it distinct from a well-formed id with no record behind it (404).
pub struct ResourceId(pub i32);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Internal(format!("Path extraction failed: {}", e.body_text())))?;

        parse_id(&raw).map(ResourceId)
    }
}

pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    let malformed = |reason: String| AppError::MalformedId {
        value: raw.to_owned(),
        reason,
    };

    let id = raw.parse::<i32>().map_err(|e| malformed(e.to_string()))?;
    if id <= 0 {
        return Err(malformed("id must be a positive integer".into()));
    }
    Ok(id)
}
