use crate::config::Env;
use crate::db::{DatabaseConnection, DatabaseKind, Db as _};

/// Connects to the database named by the environment.
/// We use `SQLite` by default, but this can be overridden in `postboard.toml`
/// or by setting the `DATABASE_URL` environment variable.
///
/// # Errors
/// Errors if connection to database fails.
/// Connections can fail if the database file cannot be opened, or if the database URL is invalid.
pub async fn connect(env: &Env) -> anyhow::Result<DatabaseConnection> {
    let connection = DatabaseConnection::connect(&env.database_url).await?;
    tracing::info!("Connected to database");
    Ok(connection)
}

/// Applies pending schema migrations.
///
/// # Errors
/// Errors if a migration fails to apply.
pub async fn migrate(connection: &DatabaseConnection) -> anyhow::Result<()> {
    match connection.kind {
        DatabaseKind::Sqlite => {
            sqlx::migrate!("./migrations/sqlite")
                .run(&connection.pool)
                .await?;
        }
    }
    tracing::info!("Database schema is up to date");
    Ok(())
}
