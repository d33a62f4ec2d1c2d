use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::entity::{blog, user};
use crate::error::{AppError, ErrorBody, MalformedIdBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::ResourceId;
use crate::models::blog::*;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_blogs, create_blog))
        .routes(routes!(get_blog, update_blog, delete_blog))
}

#[utoipa::path(
    get,
    path = "/blogs",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    description = "Returns every blog with its owner expanded to `{id, username, name}`. No pagination.",
    responses(
        (status = 200, description = "All blogs", body = [BlogResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = blog::Entity::find()
        .order_by_asc(blog::Column::Id)
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(blog, owner)| BlogResponse::new(blog, owner))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/blogs",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog",
    description = "Creates a blog owned by the authenticated user. `title`, `author` and `url` are required; `likes` defaults to 0.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Missing field, validation failure, or invalid token", body = ErrorBody),
        (status = 401, description = "No bearer token, or token expired", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_blog = validate_create_blog(payload)?;

    // The owner's blog list is derived from `blog.user_id`, so inserting the
    // row is the whole two-step write; the transaction pins the owner we read.
    let txn = state.db.begin().await?;

    let owner = user::Entity::find_by_id(auth_user.user_id)
        .one(&txn)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let model = blog::ActiveModel {
        title: Set(new_blog.title),
        author: Set(new_blog.author),
        url: Set(new_blog.url),
        likes: Set(new_blog.likes),
        user_id: Set(Some(owner.id)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(blog_id = model.id, "Blog created");
    Ok((
        StatusCode::CREATED,
        Json(BlogResponse::new(model, Some(owner))),
    ))
}

#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog by ID",
    params(("id" = String, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 400, description = "Malformed ID", body = MalformedIdBody),
        (status = 404, description = "No blog with this ID (empty body)"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<BlogResponse>, AppError> {
    let (blog, owner) = blog::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(BlogResponse::new(blog, owner)))
}

#[utoipa::path(
    put,
    path = "/blogs/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog",
    description = "Sets each provided field among title, author, url and likes. No ownership check is made.",
    params(("id" = String, Path, description = "Blog ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Malformed ID or validation failure", body = ErrorBody),
        (status = 404, description = "No blog with this ID (empty body)"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    validate_update_blog(&payload)?;

    if payload == UpdateBlogRequest::default() {
        return get_blog(State(state), ResourceId(id)).await;
    }

    let txn = state.db.begin().await?;

    let existing = blog::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: blog::ActiveModel = existing.into();

    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(author) = payload.author {
        active.author = Set(author);
    }
    if let Some(url) = payload.url {
        active.url = Set(url);
    }
    if let Some(likes) = payload.likes {
        active.likes = Set(likes);
    }

    let model = active.update(&txn).await?;
    let owner = match model.user_id {
        Some(owner_id) => user::Entity::find_by_id(owner_id).one(&txn).await?,
        None => None,
    };

    txn.commit().await?;

    Ok(Json(BlogResponse::new(model, owner)))
}

#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Deletes a blog. Only its owner may do so; anyone else gets 400.",
    params(("id" = String, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Not the owner, malformed ID, or invalid token"),
        (status = 401, description = "No bearer token, or token expired"),
        (status = 404, description = "No blog with this ID (empty body)"),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    let blog = blog::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::NotFound)?;

    if blog.user_id != Some(auth_user.user_id) {
        tracing::warn!(owner_id = ?blog.user_id, "Delete attempted by a user who does not own the blog");
        return Err(AppError::NotOwner);
    }

    blog::Entity::delete_by_id(id).exec(&state.db).await?;

    tracing::info!("Blog deleted");
    Ok(StatusCode::NO_CONTENT)
}
