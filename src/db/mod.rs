//! Database related module.
use async_trait::async_trait;
use std::str::FromStr;

use sqlx::any::{self, AnyPoolOptions};
use sqlx::AnyPool;
use sqlx::ConnectOptions;
use tracing::instrument;

/// Database initialization.
pub mod init;
/// Models for the database.
pub mod models;

/// Connections kept open for file-backed databases.
const MAX_CONNECTIONS: u32 = 50;

#[async_trait]
/// Generic Database
pub trait Db {
    /// Connects to a database.
    ///
    /// # Errors
    /// Errors if connection to database fails.
    async fn connect(url: &str) -> anyhow::Result<DatabaseConnection>;
}

/// Type of database connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    /// Sqlite database.
    Sqlite,
}

/// Database connection.
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    /// Database connection pool.
    pub pool: AnyPool,
    /// Type of database connection.
    pub kind: DatabaseKind,
}

impl DatabaseKind {
    /// Work out which kind of database a url points at.
    ///
    /// # Errors
    /// Errors if the url scheme is not supported.
    pub fn from_url(db_url: &str) -> anyhow::Result<Self> {
        match db_url {
            url if url.starts_with("sqlite:") => Ok(Self::Sqlite),
            _ => anyhow::bail!("Unsupported database URL: {}", db_url),
        }
    }
}

#[async_trait]
impl Db for DatabaseConnection {
    /// Connects to a database.
    ///
    /// In-memory `SQLite` databases live only as long as their connection, so
    /// those get a single connection that is never recycled.
    ///
    /// # Errors
    /// Errors if connection to database fails.
    #[instrument(level = "trace")]
    async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let kind = DatabaseKind::from_url(db_url)?;
        any::install_default_drivers();
        let options = any::AnyConnectOptions::from_str(db_url)?.disable_statement_logging();
        let pool_options = if db_url.contains(":memory:") {
            AnyPoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            AnyPoolOptions::new().max_connections(MAX_CONNECTIONS)
        };
        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool, kind })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_kind_from_url_when_sqlite_expect_sqlite() {
        let actual = DatabaseKind::from_url("sqlite:///tmp/posts.sqlite3?mode=rwc").unwrap();
        assert_eq!(actual, DatabaseKind::Sqlite);
    }

    #[test]
    fn test_kind_from_url_when_postgres_expect_error() {
        let actual = DatabaseKind::from_url("postgres://localhost/posts");
        assert!(actual.is_err());
    }
}
