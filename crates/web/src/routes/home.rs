//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{OptionalAuth, take_flashes};
use crate::models::CurrentUser;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
}

/// Display the landing page.
pub async fn index(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<IndexTemplate, AppError> {
    Ok(IndexTemplate {
        current_user,
        flashes: take_flashes(&session).await?,
    })
}
