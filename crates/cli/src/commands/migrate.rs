//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! serelix-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CRM_DATABASE_URL` - `SQLite` connection string (falls back to `DATABASE_URL`)
//!
//! Schema migrations live in `crates/web/migrations/`. The session table is
//! owned by the session store and created here too, so a freshly migrated
//! database is ready for the server.

use thiserror::Error;

use serelix_web::middleware::{SessionSetupError, create_session_store};

use super::{ConnectError, connect};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Session table error: {0}")]
    Session(#[from] SessionSetupError),
}

/// Run schema migrations and create the session table.
///
/// # Errors
///
/// Returns an error if the database can't be opened or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;
    tracing::info!("Schema migrations complete");

    create_session_store(&pool).await?;
    tracing::info!("Session table ready");

    pool.close().await;
    Ok(())
}
