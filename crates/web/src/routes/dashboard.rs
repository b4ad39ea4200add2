//! Dashboard and client list pages (requires auth).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAuth, take_flashes};
use crate::models::{Client, CurrentUser, DashboardStats};
use crate::services::ClientService;
use crate::state::AppState;

/// Client row as shown in tables.
#[derive(Debug, Clone)]
pub struct ClientView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub status: String,
    pub notes: String,
    pub created_at: String,
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.as_i64(),
            name: client.name.clone(),
            email: client.email.clone(),
            company: client.company.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            status: client.status.as_str().to_string(),
            notes: client.notes.clone().unwrap_or_default(),
            created_at: client.created_at.format("%b %d, %Y").to_string(),
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub user_name: String,
    pub stats: DashboardStats,
    pub clients: Vec<ClientView>,
}

/// Client list page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients.html")]
pub struct ClientsTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub clients: Vec<ClientView>,
}

/// Display the dashboard: headline counts plus the client table.
pub async fn dashboard(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<DashboardTemplate, AppError> {
    let clients = ClientService::new(state.pool()).list(user.id).await?;
    let stats = DashboardStats::from_clients(&clients);

    Ok(DashboardTemplate {
        flashes: take_flashes(&session).await?,
        user_name: user.name.clone(),
        stats,
        clients: clients.iter().map(ClientView::from).collect(),
        current_user: Some(user),
    })
}

/// Display every client the user owns.
pub async fn clients(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<ClientsTemplate, AppError> {
    let clients = ClientService::new(state.pool()).list(user.id).await?;

    Ok(ClientsTemplate {
        flashes: take_flashes(&session).await?,
        clients: clients.iter().map(ClientView::from).collect(),
        current_user: Some(user),
    })
}
