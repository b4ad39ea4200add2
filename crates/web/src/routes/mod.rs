//! HTTP route handlers for the CRM.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Landing page
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (database)
//!
//! # Auth
//! GET    /login               - Login page
//! POST   /login               - Login action (form)
//! GET    /register            - Register page
//! POST   /register            - Register action (form)
//! GET    /logout              - Logout (requires auth)
//!
//! # Pages (requires auth)
//! GET    /dashboard           - Counts and newest clients
//! GET    /clients             - Full client list
//!
//! # Client API (requires auth, JSON)
//! POST   /add_client          - Create client
//! PUT    /update_client/{id}  - Partial update
//! DELETE /delete_client/{id}  - Delete client
//! ```

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod home;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create the client JSON API router.
pub fn client_api_routes() -> Router<AppState> {
    Router::new()
        .route("/add_client", post(clients::add_client))
        .route("/update_client/{id}", put(clients::update_client))
        .route("/delete_client/{id}", delete(clients::delete_client))
}

/// Create all routes for the CRM.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/clients", get(dashboard::clients))
        .merge(auth_routes())
        .merge(client_api_routes())
}
