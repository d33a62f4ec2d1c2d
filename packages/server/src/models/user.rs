use serde::{Deserialize, Serialize};

use crate::entity::{blog, user};
use crate::error::AppError;

use super::shared::min_length_violation;

const USERNAME_MIN_LENGTH: usize = 3;
const PASSWORD_MIN_LENGTH: usize = 3;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Unique username, at least 3 characters.
    #[schema(example = "mluukkai")]
    pub username: Option<String>,
    /// Optional display name.
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
    /// Plaintext password, at least 3 characters. Only its hash is stored.
    #[schema(example = "salainen")]
    pub password: Option<String>,
}

/// A registration request that passed validation.
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// Validate a registration request. The password is checked first, before anything gets hashed.
pub fn validate_create_user(payload: CreateUserRequest) -> Result<NewUser, AppError> {
    let CreateUserRequest {
        username,
        name,
        password,
    } = payload;

    let Some(password) = password else {
        return Err(AppError::Validation("Password is mandatory.".into()));
    };
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters long."
        )));
    }

    let Some(username) = username.filter(|u| !u.is_empty()) else {
        return Err(AppError::Validation(
            "User validation failed: username: Username is mandatory.".into(),
        ));
    };
    if let Some(msg) = min_length_violation("username", &username, USERNAME_MIN_LENGTH) {
        return Err(AppError::Validation(format!("User validation failed: {msg}")));
    }

    Ok(NewUser {
        username,
        name,
        password,
    })
}

/// A blog as listed under its owner. `user` is the owner's id.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserBlog {
    #[schema(example = 42)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    #[schema(example = 1)]
    pub user: Option<i32>,
}

impl From<blog::Model> for UserBlog {
    fn from(blog: blog::Model) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user_id,
        }
    }
}

/// Public view of a user. The password hash is never part of it.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
    /// Owned blogs in creation order.
    pub blogs: Vec<UserBlog>,
}

impl UserResponse {
    pub fn new(user: user::Model, mut blogs: Vec<blog::Model>) -> Self {
        blogs.sort_by_key(|b| b.id);
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: blogs.into_iter().map(UserBlog::from).collect(),
        }
    }
}
