//! Aggregates over a list of blogs.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::blog::BlogResponse;

#[derive(Debug, PartialEq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

pub fn total_likes(blogs: &[BlogResponse]) -> i64 {
    blogs.iter().map(|b| i64::from(b.likes)).sum()
}

/// The first blog with the highest like count.
pub fn favorite_blog(blogs: &[BlogResponse]) -> Option<&BlogResponse> {
    blogs.iter().reduce(|best, b| if b.likes > best.likes { b } else { best })
}

/// The author with the most blogs. Ties go to whoever appears first.
pub fn most_blogs(blogs: &[BlogResponse]) -> Option<AuthorBlogs> {
    tally_by_author(blogs, |_| 1).map(|(author, count)| AuthorBlogs {
        author,
        blogs: count as usize,
    })
}

/// The author with the highest like total. Ties go to whoever appears first.
pub fn most_likes(blogs: &[BlogResponse]) -> Option<AuthorLikes> {
    tally_by_author(blogs, |b| i64::from(b.likes))
        .map(|(author, likes)| AuthorLikes { author, likes })
}

fn tally_by_author(
    blogs: &[BlogResponse],
    weight: impl Fn(&BlogResponse) -> i64,
) -> Option<(String, i64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, i64> = HashMap::new();

    for blog in blogs {
        let entry = totals.entry(blog.author.as_str()).or_insert_with(|| {
            order.push(blog.author.as_str());
            0
        });
        *entry += weight(blog);
    }

    order
        .into_iter()
        .map(|author| (author, totals[author]))
        .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
        .map(|(author, total)| (author.to_owned(), total))
}
