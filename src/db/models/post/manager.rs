//! Manager for the post model.
use crate::db::{DatabaseConnection, DatabaseKind};
use async_trait::async_trait;

use super::{NewPost, Post};

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all posts.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all(&self) -> anyhow::Result<Vec<Post>> {
        let statement = "
            SELECT id, title, content
            FROM posts
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Post>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Insert a new post into the database.
    ///
    /// Returns the id the database assigned to it.
    ///
    /// # Errors
    /// Errors if the post cannot be inserted into the database.
    async fn create(&self, post: &NewPost) -> anyhow::Result<i64> {
        let statement = "
            INSERT INTO posts ( title, content )
            VALUES ( $1, $2 )
            RETURNING id
        ";
        let id = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_scalar::<_, i64>(statement)
                    .bind(&post.title)
                    .bind(&post.content)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(id)
    }

    /// Delete a post by id.
    ///
    /// # Errors
    /// Errors if the delete statement fails.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM posts
            WHERE id = $1
        ";
        let deleted = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query(statement)
                    .bind(id)
                    .execute(&mut *connection)
                    .await?
                    .rows_affected()
            }
        };
        Ok(deleted)
    }
}
