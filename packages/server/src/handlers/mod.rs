pub mod blog;
pub mod login;
pub mod user;

use crate::error::AppError;

/// Router fallback for paths no handler matches.
pub async fn unknown_endpoint() -> AppError {
    AppError::UnknownEndpoint
}
