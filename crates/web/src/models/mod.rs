//! Domain models for the CRM.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`] and the view structs used by templates.

pub mod client;
pub mod session;
pub mod user;

pub use client::{Client, ClientChanges, DashboardStats, NewClient};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewAccount, User};
