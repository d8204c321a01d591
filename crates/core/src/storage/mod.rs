//! SQLite storage layer for FloodSafe
//!
//! Replaces the phone app's whole-collection JSON rewrites with atomic
//! per-record operations behind the repository traits.

mod incidents;
mod migrations;
mod parse;
mod session;
mod traits;
mod users;

use std::path::Path;

use rusqlite::Connection;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    IncidentReport, IncidentStatus, ProfilePatch, Role, SessionUser, UserRecord,
};

pub use incidents::IncidentStore;
pub use session::SessionStore;
pub use traits::{IncidentRepository, SessionRepository, Storage, UserRepository};
pub use users::UserStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get user store
    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(&self.conn)
    }

    /// Get incident store
    pub fn incidents(&self) -> IncidentStore<'_> {
        IncidentStore::new(&self.conn)
    }

    /// Get session store
    pub fn session(&self) -> SessionStore<'_> {
        SessionStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl UserRepository for Database {
    fn create_user(&self, user: &UserRecord) -> Result<()> {
        self.users().create(user)
    }

    fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        self.users().find_by_id(id)
    }

    fn find_user_by_identifier(
        &self,
        identifier: &str,
        role: Role,
    ) -> Result<Option<UserRecord>> {
        self.users().find_by_identifier(identifier, role)
    }

    fn user_identifier_taken(&self, username: &str, email: &str) -> Result<bool> {
        self.users().identifier_taken(username, email)
    }

    fn patch_user_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<Option<UserRecord>> {
        self.users().apply_patch(id, patch)
    }

    fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.users().list()
    }
}

impl IncidentRepository for Database {
    fn create_incident(&self, incident: &IncidentReport) -> Result<()> {
        self.incidents().create(incident)
    }

    fn find_incident_by_id(&self, id: Uuid) -> Result<Option<IncidentReport>> {
        self.incidents().find_by_id(id)
    }

    fn list_incidents_for_user(&self, user_id: Uuid) -> Result<Vec<IncidentReport>> {
        self.incidents().list_for_user(user_id)
    }

    fn list_incidents(&self) -> Result<Vec<IncidentReport>> {
        self.incidents().list()
    }

    fn update_incident_status(
        &self,
        id: Uuid,
        status: IncidentStatus,
    ) -> Result<Option<IncidentReport>> {
        self.incidents().update_status(id, status)
    }
}

impl SessionRepository for Database {
    fn save_session(&self, user: &SessionUser) -> Result<()> {
        self.session().save(user)
    }

    fn load_session(&self) -> Result<Option<SessionUser>> {
        self.session().load()
    }

    fn clear_session(&self) -> Result<()> {
        self.session().clear()
    }
}
