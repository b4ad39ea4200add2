//! One-shot flash messages stored in the session.
//!
//! A handler pushes a message; the next page that renders takes (and so
//! removes) every pending message.

use tower_sessions::Session;

use crate::models::session_keys;

/// Queue a message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn push_flash(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut pending: Vec<String> = session
        .get(session_keys::FLASHES)
        .await?
        .unwrap_or_default();
    pending.push(message.into());
    session.insert(session_keys::FLASHES, pending).await
}

/// Remove and return every pending message, oldest first.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn take_flashes(session: &Session) -> Result<Vec<String>, tower_sessions::session::Error> {
    // Removing marks the session modified, so only do it when something is pending.
    if session
        .get::<Vec<String>>(session_keys::FLASHES)
        .await?
        .is_none()
    {
        return Ok(Vec::new());
    }

    Ok(session
        .remove::<Vec<String>>(session_keys::FLASHES)
        .await?
        .unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flashes_are_consumed_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        push_flash(&session, "first").await.unwrap();
        push_flash(&session, "second".to_string()).await.unwrap();

        assert_eq!(take_flashes(&session).await.unwrap(), ["first", "second"]);
        assert!(take_flashes(&session).await.unwrap().is_empty());
    }
}
