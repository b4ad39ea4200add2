//! Subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use sqlx::SqlitePool;

use serelix_web::config::database_url_from_env;
use serelix_web::db;

/// Connect to the configured database and bring its schema up to date.
async fn connect() -> Result<SqlitePool, ConnectError> {
    let database_url = database_url_from_env();

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;
    db::migrate(&pool).await?;
    Ok(pool)
}

/// Errors opening the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
