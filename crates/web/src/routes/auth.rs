//! Authentication route handlers.
//!
//! Handles login, registration, and logout with email/password accounts
//! stored locally.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAuth, RequireAuth, clear_current_user, push_flash, set_current_user, take_flashes,
};
use crate::models::{CurrentUser, NewAccount, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
///
/// Every field defaults to empty so a missing field is reported as a flash
/// message instead of a bare 422.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl From<RegisterForm> for NewAccount {
    fn from(form: RegisterForm) -> Self {
        Self {
            email: form.email,
            password: form.password,
            name: form.name,
            company: form.company,
        }
    }
}

/// Where to go after logging in.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

impl NextQuery {
    /// The `next` target if it may be followed, otherwise the dashboard.
    fn target(&self) -> &str {
        self.next
            .as_deref()
            .filter(|next| is_followable(next))
            .unwrap_or("/dashboard")
    }
}

/// Pages that must never be the landing point of a fresh login.
const AUTH_PAGES: [&str; 3] = ["/login", "/logout", "/register"];

/// Only same-origin absolute paths outside the auth pages are followed after
/// login.
fn is_followable(next: &str) -> bool {
    if !next.starts_with('/') || next.starts_with("//") || next.contains('\\') {
        return false;
    }
    let path = next.split(['?', '#']).next().unwrap_or(next);
    !AUTH_PAGES.contains(&path.trim_end_matches('/'))
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub next: Option<String>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub email: String,
    pub name: String,
    pub company: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Query(query): Query<NextQuery>,
) -> Result<LoginTemplate, AppError> {
    Ok(LoginTemplate {
        current_user,
        flashes: take_flashes(&session).await?,
        next: query.next.filter(|next| is_followable(next)),
        email: String::new(),
    })
}

/// Handle login form submission.
///
/// On bad credentials the form is re-rendered with a flash message and the
/// submitted email kept.
pub async fn login(
    OptionalAuth(current_user): OptionalAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            start_session(&session, &user).await?;
            tracing::info!(user_id = %user.id, "user logged in");
            Ok(Redirect::to(query.target()).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("login failed: invalid credentials");
            push_flash(&session, "Invalid email or password").await?;
            Ok(LoginTemplate {
                current_user,
                flashes: take_flashes(&session).await?,
                next: query.next.filter(|next| is_followable(next)),
                email: form.email,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<RegisterTemplate, AppError> {
    Ok(RegisterTemplate {
        current_user,
        flashes: take_flashes(&session).await?,
        email: String::new(),
        name: String::new(),
        company: String::new(),
    })
}

/// Handle registration form submission.
///
/// Creates the account, logs the new user in, and redirects to the dashboard.
pub async fn register(
    OptionalAuth(current_user): OptionalAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let email = form.email.clone();
    let name = form.name.clone();
    let company = form.company.clone().unwrap_or_default();

    let auth = AuthService::new(state.pool());
    let user = match auth.register(form.into()).await {
        Ok(user) => user,
        Err(e) => {
            let Some(message) = registration_message(&e) else {
                return Err(e.into());
            };
            tracing::warn!(error = %e, "registration rejected");
            push_flash(&session, message).await?;
            return Ok(RegisterTemplate {
                current_user,
                flashes: take_flashes(&session).await?,
                email,
                name,
                company,
            }
            .into_response());
        }
    };

    start_session(&session, &user).await?;
    Ok(Redirect::to("/dashboard").into_response())
}

/// User-facing text for registration errors the visitor can fix.
fn registration_message(err: &AuthError) -> Option<String> {
    match err {
        AuthError::UserAlreadyExists => Some("Email already exists".to_string()),
        AuthError::InvalidEmail(_) => Some("Invalid email address".to_string()),
        AuthError::MissingField("password") => Some("Password is required".to_string()),
        AuthError::MissingField("name") => Some("Name is required".to_string()),
        AuthError::MissingField(field) => Some(format!("Missing {field}")),
        AuthError::InvalidCredentials
        | AuthError::UserNotFound
        | AuthError::Repository(_)
        | AuthError::PasswordHash => None,
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Log out and return to the landing page.
pub async fn logout(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Redirect, AppError> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!(user_id = %user.id, "user logged out");
    Ok(Redirect::to("/"))
}

async fn start_session(session: &Session, user: &User) -> Result<(), AppError> {
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}
