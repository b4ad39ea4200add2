//! User account management commands.
//!
//! # Usage
//!
//! ```bash
//! serelix-cli user create -e ada@example.com -n "Ada Lovelace" -c "Analytical Engines"
//! serelix-cli user promote -e ada@example.com
//! serelix-cli user list
//! ```

use thiserror::Error;

use serelix_web::models::NewAccount;
use serelix_web::services::auth::{AuthError, AuthService};

use super::{ConnectError, connect};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Registration or lookup failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Create a new user, optionally with administrator rights.
///
/// # Errors
///
/// Returns `UserError::Auth` if the email is invalid or already registered.
pub async fn create(
    email: String,
    name: String,
    password: String,
    company: Option<String>,
    admin: bool,
) -> Result<(), UserError> {
    let pool = connect().await?;
    let auth = AuthService::new(&pool);

    let user = auth
        .register(NewAccount {
            email,
            password,
            name,
            company,
        })
        .await?;

    if admin {
        auth.promote(user.email.as_str()).await?;
    }

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        admin,
        "User created"
    );
    Ok(())
}

/// Grant administrator rights to an existing user.
///
/// # Errors
///
/// Returns `UserError::Auth` with `AuthError::UserNotFound` for unknown emails.
pub async fn promote(email: &str) -> Result<(), UserError> {
    let pool = connect().await?;
    AuthService::new(&pool).promote(email).await?;

    tracing::info!(email, "User promoted to administrator");
    Ok(())
}

/// Print every user, oldest first.
///
/// # Errors
///
/// Returns an error if the database can't be read.
pub async fn list() -> Result<(), UserError> {
    let pool = connect().await?;
    let users = AuthService::new(&pool).list_users().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{:<6} {:<32} {:<24} {:<6} CREATED", "ID", "EMAIL", "NAME", "ADMIN");
        for user in &users {
            println!(
                "{:<6} {:<32} {:<24} {:<6} {}",
                user.id,
                user.email,
                user.name,
                if user.is_admin { "yes" } else { "no" },
                user.created_at.format("%Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}
