//! Participant registration types.
//!
//! # Memory Security
//!
//! The private key issued at registration is the only secret this client
//! ever holds. `Identity` zeroizes it on drop and never prints it via `Debug`.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Role a participant registers under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Provider,
}

impl Role {
    /// All selectable roles, in display order.
    pub const ALL: [Role; 2] = [Role::Patient, Role::Provider];

    /// Wire value sent to the service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Provider => "provider",
        }
    }

    /// Human-readable option label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Provider => "Provider",
        }
    }

    /// The other role (the selector only has two options).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Role::Patient => Role::Provider,
            Role::Provider => Role::Patient,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub role: Role,
}

impl Registration {
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Identity issued by a successful registration.
///
/// Additional response fields (such as `status`) are ignored.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Identifier assigned by the service (not secret)
    #[zeroize(skip)]
    pub user_id: String,

    /// Private key material returned once at registration
    pub private_key: String,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
