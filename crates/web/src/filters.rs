//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use serelix_core::ClientStatus;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Human label for a stored status string, e.g. `lead` becomes `Lead`.
///
/// Usage in templates: `{{ client.status|status_label }}`
#[askama::filter_fn]
pub fn status_label(status: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(ClientStatus::from(status.to_string()).label())
}

/// CSS modifier class for a status badge. Unknown statuses share one class.
///
/// Usage in templates: `<span class="badge {{ client.status|status_class }}">`
#[askama::filter_fn]
pub fn status_class(
    status: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(match ClientStatus::from(status.to_string()) {
        ClientStatus::Lead => "badge-lead",
        ClientStatus::Active => "badge-active",
        ClientStatus::Inactive => "badge-inactive",
        ClientStatus::Other(_) => "badge-other",
    })
}
