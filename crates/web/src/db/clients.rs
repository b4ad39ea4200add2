//! Client record repository.
//!
//! The repository does not enforce ownership; callers go through
//! [`crate::services::clients::ClientService`], which does.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use serelix_core::{ClientId, ClientStatus, UserId};

use super::RepositoryError;
use crate::models::{Client, NewClient};

const CLIENT_COLUMNS: &str = "id, name, email, company, phone, status, notes, created_at, user_id";

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: ClientId,
    name: String,
    email: String,
    company: Option<String>,
    phone: Option<String>,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    user_id: UserId,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            company: row.company,
            phone: row.phone,
            status: ClientStatus::from(row.status),
            notes: row.notes,
            created_at: row.created_at,
            user_id: row.user_id,
        }
    }
}

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a client owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// foreign-key violation for an unknown owner).
    pub async fn create(&self, owner: UserId, new: &NewClient) -> Result<Client, RepositoryError> {
        let status = new.status.clone().unwrap_or_default();

        let row: ClientRow = sqlx::query_as(&format!(
            r"
            INSERT INTO clients (name, email, company, phone, status, notes, created_at, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {CLIENT_COLUMNS}
            "
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.company.as_deref())
        .bind(new.phone.as_deref())
        .bind(status.as_str())
        .bind(new.notes.as_deref())
        .bind(Utc::now())
        .bind(owner)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a client by ID, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row: Option<ClientRow> =
            sqlx::query_as(&format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Client::from))
    }

    /// List every client owned by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, owner: UserId) -> Result<Vec<Client>, RepositoryError> {
        let rows: Vec<ClientRow> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Persist the mutable fields of `client`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the client no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, client: &Client) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE clients
            SET name = ?, email = ?, company = ?, phone = ?, status = ?, notes = ?
            WHERE id = ?
            ",
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(client.company.as_deref())
        .bind(client.phone.as_deref())
        .bind(client.status.as_str())
        .bind(client.notes.as_deref())
        .bind(client.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a client by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the client was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
