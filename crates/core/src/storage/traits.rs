//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future remote backend). Every mutation is
//! an atomic per-record operation; callers never rewrite whole collections.

use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    IncidentReport, IncidentStatus, ProfilePatch, Role, SessionUser, UserRecord,
};

/// User repository operations
pub trait UserRepository {
    /// Create a new registered user
    fn create_user(&self, user: &UserRecord) -> Result<()>;

    /// Find a user by ID
    fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    /// Find a user by username or email, restricted to a role
    fn find_user_by_identifier(&self, identifier: &str, role: Role)
        -> Result<Option<UserRecord>>;

    /// Whether a username or email is already registered
    fn user_identifier_taken(&self, username: &str, email: &str) -> Result<bool>;

    /// Shallow-merge a profile patch into a user; returns the updated record,
    /// or `None` when no such user exists
    fn patch_user_profile(&self, id: Uuid, patch: &ProfilePatch)
        -> Result<Option<UserRecord>>;

    /// All registered users in insertion order
    fn list_users(&self) -> Result<Vec<UserRecord>>;
}

/// Incident repository operations
pub trait IncidentRepository {
    /// Store a new incident report
    fn create_incident(&self, incident: &IncidentReport) -> Result<()>;

    /// Find an incident by ID
    fn find_incident_by_id(&self, id: Uuid) -> Result<Option<IncidentReport>>;

    /// A submitter's incidents in insertion order
    fn list_incidents_for_user(&self, user_id: Uuid) -> Result<Vec<IncidentReport>>;

    /// All incidents in insertion order
    fn list_incidents(&self) -> Result<Vec<IncidentReport>>;

    /// Overwrite an incident's status and stamp `updated_at`; returns the
    /// updated record, or `None` when no such incident exists
    fn update_incident_status(
        &self,
        id: Uuid,
        status: IncidentStatus,
    ) -> Result<Option<IncidentReport>>;
}

/// Session projection operations
pub trait SessionRepository {
    /// Persist the session projection, replacing any previous one
    fn save_session(&self, user: &SessionUser) -> Result<()>;

    /// Read the persisted session projection
    fn load_session(&self) -> Result<Option<SessionUser>>;

    /// Delete the session projection; a no-op when none exists
    fn clear_session(&self) -> Result<()>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
pub trait Storage: UserRepository + IncidentRepository + SessionRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where T: UserRepository + IncidentRepository + SessionRepository {}
