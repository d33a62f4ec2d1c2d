use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sea_orm::EntityTrait;

use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Raw token taken from an `Authorization: Bearer <token>` header.
///
/// A missing header or any other scheme is rejected before the handler runs.
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| {
                tracing::debug!("Request without a bearer token");
                AppError::Unauthorized
            })?;

        Ok(BearerToken(token.to_owned()))
    }
}

/// The user a verified bearer token belongs to.
///
/// Add this as a handler parameter to require authentication.
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub name: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let claims = jwt::verify(&token, &state.config.auth.jwt_secret)?;
        let user_id = claims.id.ok_or(AppError::TokenWithoutUser)?;

        let user = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id, "Token refers to a user that no longer exists");
                AppError::TokenInvalid
            })?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            name: user.name,
        })
    }
}
