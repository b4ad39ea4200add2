//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration, password login, admin promotion
//! - `clients` - Client record CRUD with per-user ownership checks

pub mod auth;
pub mod clients;

pub use auth::{AuthError, AuthService};
pub use clients::{ClientError, ClientService};
