use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::entity::{blog, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::user::{CreateUserRequest, UserResponse, validate_create_user};
use crate::state::AppState;
use crate::utils::hash;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_users, create_user))
}

/// Handle user registration.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    operation_id = "createUser",
    summary = "Register a user",
    description = "Creates a user. Password and username must both be at least 3 characters; usernames are unique.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failure or duplicate username", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = ?payload.username))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(username) = payload.username.as_deref() {
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&state.db)
            .await?
            .is_some();
        if taken {
            return Err(AppError::UsernameTaken);
        }
    }

    let new_user = validate_create_user(payload)?;

    let password_hash = hash::hash_password(&new_user.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let user = user::ActiveModel {
        username: Set(new_user.username),
        name: Set(new_user.name),
        password_hash: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race condition: unique constraint caught on insert");
            AppError::UsernameTaken
        }
        _ => AppError::from(e),
    })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::new(user, Vec::new()))))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    description = "Returns every user with their blogs expanded. Password hashes are never included.",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    // Rows come back ordered by user id.
    let rows = user::Entity::find()
        .find_with_related(blog::Entity)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(user, blogs)| UserResponse::new(user, blogs))
            .collect(),
    ))
}
