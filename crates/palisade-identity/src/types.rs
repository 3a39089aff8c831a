//! Identity entity type definitions.

use serde::{Deserialize, Serialize};

/// Name of the synthetic context user attributed to system-initiated
/// operations.
pub const SYSTEM_USER_NAME: &str = "System";

/// User record
///
/// `name` is the unique, case-sensitive primary identifier. `secret_hash`
/// holds the PHC-formatted credential hash and is never exposed through
/// anything but the stored record itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub name: String,
    pub description: String,
    pub secret_hash: String,
    pub groups: Vec<String>,
    pub created: u64,
    pub updated: u64,
    pub created_by: String,
    pub updated_by: String,
}

impl User {
    /// Create a user with just a name and description, for passing to
    /// `add_user`. Audit and credential fields are assigned by the manager.
    pub fn with_name(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// The synthetic "System" context user, attributed to operations the
    /// system performs on its own behalf. Never persisted.
    pub fn system() -> Self {
        Self::with_name(SYSTEM_USER_NAME, "The system user")
    }
}

/// Group record
///
/// Membership is a set; storage keeps it as a sorted, de-duplicated vector
/// of user names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub name: String,
    pub description: String,
    pub users: Vec<String>,
    pub created: u64,
    pub updated: u64,
    pub created_by: String,
    pub updated_by: String,
}

/// Short-lived session token, stored in the token store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub id: String,
    pub user_name: String,
    pub created: u64,
    pub expires: u64,
}

/// Current time as seconds since the Unix epoch.
///
/// Falls back to 0 only if the system clock reads before the epoch.
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
