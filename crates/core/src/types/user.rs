//! The current-user record the login flow leaves in storage.
//!
//! Nothing in this workspace creates or validates these records beyond
//! reading `userType`; the login flow that writes them lives elsewhere.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Account type carried on the stored user record.
///
/// Only the exact lowercase string `"admin"` maps to [`UserType::Admin`].
/// Any value other than `"admin"` or `"user"` is kept as [`UserType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    User,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid user type: {s}")),
        }
    }
}

/// Stored identity of whoever is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub user_type: UserType,
}

impl CurrentUser {
    /// Create a record with just a user type.
    #[must_use]
    pub const fn new(user_type: UserType) -> Self {
        Self {
            id: None,
            username: None,
            email: None,
            user_type,
        }
    }

    /// Whether the record claims admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}
