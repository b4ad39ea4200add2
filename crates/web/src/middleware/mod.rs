//! HTTP middleware stack for the CRM.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `SQLite` store, signed cookie)
//! 4. Auth extractors (`RequireAuth`, `OptionalAuth`) per handler

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use flash::{push_flash, take_flashes};
pub use session::{
    CrmSessionLayer, SESSION_COOKIE_NAME, SessionSetupError, create_session_layer,
    create_session_store,
};
