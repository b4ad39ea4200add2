//! Client record service.
//!
//! Every operation takes the acting user and refuses to touch records that
//! user does not own. Lookups check existence before ownership, so a missing
//! record is `NotFound` for everyone and a foreign one is `Forbidden`.

use sqlx::SqlitePool;
use thiserror::Error;

use serelix_core::{ClientId, UserId};

use crate::db::{ClientRepository, RepositoryError};
use crate::models::{Client, ClientChanges, NewClient};

/// Errors from client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No client with this ID exists.
    #[error("client {0} not found")]
    NotFound(ClientId),

    /// The client belongs to another user.
    #[error("client {0} belongs to another user")]
    Forbidden(ClientId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Client CRUD scoped to the acting user.
pub struct ClientService<'a> {
    clients: ClientRepository<'a>,
}

impl<'a> ClientService<'a> {
    /// Create a new client service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            clients: ClientRepository::new(pool),
        }
    }

    /// List the acting user's clients, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Repository` if the query fails.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Client>, ClientError> {
        Ok(self.clients.list_for_user(owner).await?)
    }

    /// Create a client owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Repository` if the insert fails.
    pub async fn create(&self, owner: UserId, new: NewClient) -> Result<Client, ClientError> {
        let client = self.clients.create(owner, &new.normalized()).await?;
        tracing::info!(client_id = %client.id, user_id = %owner, "client created");
        Ok(client)
    }

    /// Apply a partial update to one of the acting user's clients.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the client doesn't exist.
    /// Returns `ClientError::Forbidden` if another user owns it.
    pub async fn update(
        &self,
        owner: UserId,
        id: ClientId,
        changes: ClientChanges,
    ) -> Result<Client, ClientError> {
        let mut client = self.owned(owner, id).await?;
        changes.apply_to(&mut client);

        self.clients.update(&client).await.map_err(|e| match e {
            RepositoryError::NotFound => ClientError::NotFound(id),
            other => ClientError::Repository(other),
        })?;

        tracing::info!(client_id = %id, user_id = %owner, "client updated");
        Ok(client)
    }

    /// Delete one of the acting user's clients.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the client doesn't exist.
    /// Returns `ClientError::Forbidden` if another user owns it.
    pub async fn delete(&self, owner: UserId, id: ClientId) -> Result<(), ClientError> {
        self.owned(owner, id).await?;

        if !self.clients.delete(id).await? {
            return Err(ClientError::NotFound(id));
        }

        tracing::info!(client_id = %id, user_id = %owner, "client deleted");
        Ok(())
    }

    /// Fetch a client and check that `owner` owns it.
    async fn owned(&self, owner: UserId, id: ClientId) -> Result<Client, ClientError> {
        let client = self
            .clients
            .get_by_id(id)
            .await?
            .ok_or(ClientError::NotFound(id))?;

        if !client.is_owned_by(owner) {
            tracing::warn!(client_id = %id, user_id = %owner, "cross-user client access denied");
            return Err(ClientError::Forbidden(id));
        }

        Ok(client)
    }
}
