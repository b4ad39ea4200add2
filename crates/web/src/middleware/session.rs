//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions. The session cookie
//! is signed with the configured session secret.

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::{AppConfig, MIN_SESSION_SECRET_LENGTH};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "serelix_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session layer type used by the router.
pub type CrmSessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

/// Errors building the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionSetupError {
    /// The session store table could not be created.
    #[error("session store migration failed: {0}")]
    Store(#[from] sqlx::Error),

    /// The session secret is too short to derive a signing key.
    #[error("session secret must be at least {MIN_SESSION_SECRET_LENGTH} bytes")]
    KeyTooShort,
}

/// Create the session store, making sure its table exists.
///
/// # Errors
///
/// Returns `SessionSetupError::Store` if the table cannot be created.
pub async fn create_session_store(pool: &SqlitePool) -> Result<SqliteStore, SessionSetupError> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}

/// Create the session layer around an existing store.
///
/// # Errors
///
/// Returns `SessionSetupError::KeyTooShort` if the session secret cannot be
/// used as a signing key.
pub fn create_session_layer(
    store: SqliteStore,
    config: &AppConfig,
) -> Result<CrmSessionLayer, SessionSetupError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())
        .map_err(|_| SessionSetupError::KeyTooShort)?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
