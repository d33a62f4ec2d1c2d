use serde::{Deserialize, Serialize};

use crate::entity::{blog, user};
use crate::error::AppError;

use super::shared::min_length_violation;

const TITLE_MIN_LENGTH: usize = 3;

/// Request body for creating a blog. `title`, `author` and `url` are required.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "Go To Statement Considered Harmful")]
    pub title: Option<String>,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    #[schema(example = "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf")]
    pub url: Option<String>,
    /// Defaults to 0.
    #[schema(example = 5)]
    pub likes: Option<i32>,
}

/// A create request that passed validation.
#[derive(Debug, PartialEq)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
}

pub fn validate_create_blog(payload: CreateBlogRequest) -> Result<NewBlog, AppError> {
    let CreateBlogRequest {
        title,
        author,
        url,
        likes,
    } = payload;

    let (Some(title), Some(author), Some(url)) = (title, author, url) else {
        return Err(AppError::Validation(
            "Blog validation failed: title, author and url are required".into(),
        ));
    };

    if let Some(msg) = title_violation(&title) {
        return Err(AppError::Validation(format!("Blog validation failed: {msg}")));
    }

    Ok(NewBlog {
        title,
        author,
        url,
        likes: likes.unwrap_or(0),
    })
}

/// Request body for updating a blog. Absent fields are left untouched.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    #[schema(example = 6)]
    pub likes: Option<i32>,
}

pub fn validate_update_blog(payload: &UpdateBlogRequest) -> Result<(), AppError> {
    if let Some(msg) = payload.title.as_deref().and_then(title_violation) {
        return Err(AppError::Validation(format!("Validation failed: {msg}")));
    }
    Ok(())
}

fn title_violation(title: &str) -> Option<String> {
    if title.is_empty() {
        return Some("title: Path `title` is required.".into());
    }
    min_length_violation("title", title, TITLE_MIN_LENGTH)
}

/// Owner of a blog as shown in blog listings.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogOwner {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
}

impl From<user::Model> for BlogOwner {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

/// A blog with its owner expanded.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    #[schema(example = 42)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub url: String,
    #[schema(example = 5)]
    pub likes: i32,
    /// `null` for blogs that have no owner.
    pub user: Option<BlogOwner>,
}

impl BlogResponse {
    pub fn new(blog: blog::Model, owner: Option<user::Model>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner.map(BlogOwner::from),
        }
    }
}
