//! Client record domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use serelix_core::{ClientId, ClientStatus, UserId};

/// A CRM lead or account record (domain type).
///
/// Owned by exactly one user; only that user may read or change it.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// The user this record belongs to.
    pub user_id: UserId,
}

impl Client {
    /// Whether `user_id` owns this record.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Payload for `POST /add_client`.
///
/// `name` and `email` are required; everything else is optional and
/// `status` defaults to `lead`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewClient {
    /// Drop blank optional fields so they are stored as NULL.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            company: non_blank(self.company),
            phone: non_blank(self.phone),
            notes: non_blank(self.notes),
            ..self
        }
    }
}

/// Payload for `PUT /update_client/{id}`.
///
/// Absent keys leave the stored value alone. For the nullable fields
/// (`company`, `phone`, `notes`) an explicit `null` clears the value, which
/// is why they are double options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

impl ClientChanges {
    /// Apply the present fields to `client`.
    pub fn apply_to(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(company) = self.company {
            client.company = non_blank(company);
        }
        if let Some(phone) = self.phone {
            client.phone = non_blank(phone);
        }
        if let Some(status) = self.status {
            client.status = status;
        }
        if let Some(notes) = self.notes {
            client.notes = non_blank(notes);
        }
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub leads: usize,
    pub active: usize,
}

impl DashboardStats {
    /// Count clients by status.
    #[must_use]
    pub fn from_clients(clients: &[Client]) -> Self {
        clients.iter().fold(
            Self {
                total_clients: clients.len(),
                ..Self::default()
            },
            |mut stats, client| {
                match client.status {
                    ClientStatus::Lead => stats.leads += 1,
                    ClientStatus::Active => stats.active += 1,
                    ClientStatus::Inactive | ClientStatus::Other(_) => {}
                }
                stats
            },
        )
    }
}

/// Deserialize a field that was present in the payload, `null` included.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
