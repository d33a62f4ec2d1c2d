use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::DbErr;
use serde::Serialize;

const UNAUTHORIZED_MESSAGE: &str = "User is not authorized or authentication method is different.";
const NOT_OWNER_MESSAGE: &str = "Only the creator of a blog can delete it.";

/// JSON error body returned by most failures.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "token missing or invalid")]
    pub error: String,
}

/// Body returned when a path identifier cannot be parsed.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MalformedIdBody {
    #[schema(example = "Malformed ID")]
    pub error: String,
    #[schema(example = "Cast to id failed for value \"abc\" at path \"id\"")]
    pub error_message: String,
    pub error_body: MalformedIdDetail,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MalformedIdDetail {
    #[schema(example = "id")]
    pub kind: &'static str,
    #[schema(example = "abc")]
    pub value: String,
    #[schema(example = "id")]
    pub path: &'static str,
    #[schema(example = "invalid digit found in string")]
    pub reason: String,
}

/// Every failure a handler or extractor can produce.
///
/// This is the only place where failure kinds are turned into HTTP status codes and bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed id {value:?}: {reason}")]
    MalformedId { value: String, reason: String },
    #[error("{0}")]
    Validation(String),
    #[error("username already taken")]
    UsernameTaken,
    #[error("token missing or invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("token does not identify a user")]
    TokenWithoutUser,
    #[error("no bearer token")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("not found")]
    NotFound,
    #[error("requester does not own the blog")]
    NotOwner,
    #[error("unknown endpoint")]
    UnknownEndpoint,
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedId { .. }
            | AppError::Validation(_)
            | AppError::UsernameTaken
            | AppError::TokenInvalid
            | AppError::NotOwner => StatusCode::BAD_REQUEST,
            AppError::TokenExpired
            | AppError::TokenWithoutUser
            | AppError::Unauthorized
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound | AppError::UnknownEndpoint => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::MalformedId { value, reason } => {
                let body = MalformedIdBody {
                    error: "Malformed ID".into(),
                    error_message: format!("Cast to id failed for value \"{value}\" at path \"id\""),
                    error_body: MalformedIdDetail {
                        kind: "id",
                        value,
                        path: "id",
                        reason,
                    },
                };
                (status, Json(body)).into_response()
            }
            AppError::Validation(msg) => error_json(status, msg),
            AppError::UsernameTaken => error_json(status, "expected `username` to be unique"),
            AppError::TokenInvalid => error_json(status, "token missing or invalid"),
            AppError::TokenExpired => error_json(status, "token expired"),
            AppError::TokenWithoutUser => error_json(status, "token does not identify a user"),
            AppError::InvalidCredentials => error_json(status, "invalid username or password"),
            // These two are bare JSON strings, not objects.
            AppError::Unauthorized => (status, Json(UNAUTHORIZED_MESSAGE)).into_response(),
            AppError::NotOwner => (status, Json(NOT_OWNER_MESSAGE)).into_response(),
            AppError::NotFound => status.into_response(),
            AppError::UnknownEndpoint => error_json(status, "unknown endpoint"),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                error_json(status, "internal server error")
            }
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => {
                tracing::debug!("Token rejected: {}", err);
                AppError::TokenInvalid
            }
        }
    }
}
