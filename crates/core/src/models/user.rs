//! User identity models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role, fixed at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reports incidents from the field
    Citizen,
    /// Coordinates relief and triages reports
    Ngo,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Ngo => "ngo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "citizen" => Some(Role::Citizen),
            "ngo" => Some(Role::Ngo),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account
///
/// JSON field names stay camelCase for compatibility with records exported
/// from the phone app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string; plaintext is never stored
    pub password_hash: String,
    pub role: Role,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    /// Government registration id, NGO accounts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a record from a registration submission and its hashed password
    pub fn from_registration(profile: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: profile.username,
            email: profile.email,
            password_hash,
            role: profile.role,
            full_name: profile.full_name,
            phone: profile.phone,
            address: profile.address,
            city: profile.city,
            state: profile.state,
            pincode: profile.pincode,
            registration_id: profile.registration_id,
            created_at: Utc::now(),
        }
    }

    /// The projection persisted as "currently logged in user"
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            user_id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            full_name: Some(self.full_name.clone()),
            phone: Some(self.phone.clone()),
        }
    }
}

/// The persisted session projection; at most one exists at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Serialized as `id`, the key the phone app used for this record
    #[serde(rename = "id")]
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SessionUser {
    /// Merge the patched fields that are part of the projection
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = Some(full_name.clone());
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
    }
}

/// Registration submission; `password` is hashed before anything is stored
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub registration_id: Option<String>,
}

/// Shallow profile update; `None` leaves the stored value untouched
///
/// Identity fields (username, email, role, password) are not patchable.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.pincode.is_none()
    }
}
