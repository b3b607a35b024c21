use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row as _};

pub mod manager;

/// Store capability for posts.
///
/// Every operation is a single statement, so atomicity and isolation are
/// whatever the underlying database gives a single statement.
#[async_trait]
pub trait Manager: Send + Sync {
    /// Find all posts, in whatever order the store returns them.
    async fn find_all(&self) -> anyhow::Result<Vec<Post>>;
    /// Insert a new post, returning the id the store assigned to it.
    async fn create(&self, post: &NewPost) -> anyhow::Result<i64>;
    /// Delete the post with the given id, returning how many rows went away.
    /// Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<u64>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a post.
pub struct Post {
    /// Store-generated identifier. Never reused.
    pub id: i64,
    /// Title of the post.
    pub title: String,
    /// Body of the post.
    pub content: String,
}

impl FromRow<'_, AnyRow> for Post {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
        })
    }
}

/// Values a caller supplies to create a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Title of the post.
    pub title: String,
    /// Body of the post.
    pub content: String,
}

impl NewPost {
    /// Create a new post payload.
    #[must_use]
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_owned(),
            content: content.to_owned(),
        }
    }
}
