//! Client lifecycle status.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where a client sits in the sales pipeline.
///
/// Stored and transmitted as a lowercase string. The well-known values get
/// their own variants; anything else a caller sends is kept verbatim in
/// [`ClientStatus::Other`] so no data is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ClientStatus {
    /// A prospective customer.
    #[default]
    Lead,
    /// A paying customer.
    Active,
    /// A former or dormant customer.
    Inactive,
    /// Any other label.
    Other(String),
}

impl ClientStatus {
    /// Returns the stored string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lead => "lead",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Other(s) => s,
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.as_str().chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl From<&str> for ClientStatus {
    fn from(s: &str) -> Self {
        match s {
            "lead" => Self::Lead,
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ClientStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "lead" | "active" | "inactive" => Self::from(s.as_str()),
            _ => Self::Other(s),
        }
    }
}

impl FromStr for ClientStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClientStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClientStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
