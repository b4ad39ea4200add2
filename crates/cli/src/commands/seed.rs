//! Seed a user's account with demo clients.
//!
//! Useful for trying the dashboard locally; every seeded client is owned by
//! the given user and can be edited or deleted like any other.

use thiserror::Error;

use serelix_core::ClientStatus;
use serelix_web::models::NewClient;
use serelix_web::services::auth::{AuthError, AuthService};
use serelix_web::services::clients::{ClientError, ClientService};

use super::{ConnectError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Client(#[from] ClientError),
}

/// Name, email, company, status, notes.
const DEMO_CLIENTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Maya Chen",
        "maya@northwind.example",
        "Northwind Traders",
        "lead",
        "Asked for a pricing sheet",
    ),
    (
        "Jonas Weber",
        "jonas@bluepeak.example",
        "Blue Peak Logistics",
        "active",
        "Renewal due in Q3",
    ),
    (
        "Priya Raman",
        "priya@lumen.example",
        "Lumen Health",
        "lead",
        "Intro call booked",
    ),
    (
        "Tomás García",
        "tomas@ferro.example",
        "Ferro Studio",
        "inactive",
        "Paused after pilot",
    ),
];

/// Add the demo clients to `email`'s account.
///
/// # Errors
///
/// Returns `SeedError::Auth` if no user has this email.
pub async fn demo_clients(email: &str) -> Result<(), SeedError> {
    let pool = connect().await?;
    let user = AuthService::new(&pool).get_user(email).await?;
    let clients = ClientService::new(&pool);

    for (name, client_email, company, status, notes) in DEMO_CLIENTS {
        let new = NewClient {
            name: (*name).to_string(),
            email: (*client_email).to_string(),
            company: Some((*company).to_string()),
            phone: None,
            status: Some(ClientStatus::from(*status)),
            notes: Some((*notes).to_string()),
        };
        clients.create(user.id, new).await?;
    }

    tracing::info!(
        user_id = %user.id,
        count = DEMO_CLIENTS.len(),
        "Demo clients created"
    );
    Ok(())
}
