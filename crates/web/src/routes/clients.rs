//! Client record JSON API (requires auth).
//!
//! Called from `static/js/crm.js`. Every response body is JSON.

use axum::{
    Json,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
};
use serde_json::{Value, json};

use serelix_core::ClientId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{ClientChanges, NewClient};
use crate::services::ClientService;
use crate::state::AppState;

/// The `{id}` segment of a client route.
///
/// A segment that is not an integer names no client, so it is a 404 rather
/// than axum's plain-text 400.
pub struct ClientIdPath(pub ClientId);

impl<S> FromRequestParts<S> for ClientIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<ClientId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::NotFound(rejection.body_text()))?;
        Ok(Self(id))
    }
}

/// Create a client owned by the current user.
///
/// Responds `{"success": true, "id": N}`.
pub async fn add_client(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<NewClient>,
) -> Result<Json<Value>, AppError> {
    let client = ClientService::new(state.pool())
        .create(user.id, payload)
        .await?;

    Ok(Json(json!({ "success": true, "id": client.id })))
}

/// Partially update one of the current user's clients.
pub async fn update_client(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ClientIdPath(id): ClientIdPath,
    Json(changes): Json<ClientChanges>,
) -> Result<Json<Value>, AppError> {
    ClientService::new(state.pool())
        .update(user.id, id, changes)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// Delete one of the current user's clients.
pub async fn delete_client(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ClientIdPath(id): ClientIdPath,
) -> Result<Json<Value>, AppError> {
    ClientService::new(state.pool()).delete(user.id, id).await?;

    Ok(Json(json!({ "success": true })))
}
