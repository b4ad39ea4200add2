//! Serelix CRM web library.
//!
//! This crate provides the CRM server as a library, allowing it to be
//! tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use middleware::CrmSessionLayer;
use state::AppState;

/// Directory holding CSS and JavaScript assets.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the application router with sessions, static files and tracing.
///
/// Sentry layers are added by the binary so tests run without them.
pub fn app(state: AppState, session_layer: CrmSessionLayer) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
