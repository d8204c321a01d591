//! User storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_role, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{ProfilePatch, Role, UserRecord};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, full_name, phone, \
     address, city, state, pincode, registration_id, created_at";

fn read_user(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role: parse_role(&row.get::<_, String>(4)?)?,
        full_name: row.get(5)?,
        phone: row.get(6)?,
        address: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        pincode: row.get(10)?,
        registration_id: row.get(11)?,
        created_at: parse_datetime(&row.get::<_, String>(12)?)?,
    })
}

pub struct UserStore<'a> {
    conn: &'a Connection,
}

impl<'a> UserStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new registered user
    #[instrument(skip(self, user), fields(username = %user.username, role = %user.role))]
    pub fn create(&self, user: &UserRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, username, email, password_hash, role, full_name, phone, \
             address, city, state, pincode, registration_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                user.id.to_string(),
                user.username,
                user.email,
                user.password_hash,
                user.role.as_str(),
                user.full_name,
                user.phone,
                user.address,
                user.city,
                user.state,
                user.pincode,
                user.registration_id,
                user.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find user by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;

        let user = stmt
            .query_row(params![id.to_string()], read_user)
            .optional()?;

        Ok(user)
    }

    /// Find user by username or email, restricted to a role
    ///
    /// First match in insertion order wins.
    #[instrument(skip(self, identifier))]
    pub fn find_by_identifier(&self, identifier: &str, role: Role) -> Result<Option<UserRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE (username = ?1 OR email = ?1) AND role = ?2 \
             ORDER BY rowid LIMIT 1"
        ))?;

        let user = stmt
            .query_row(params![identifier, role.as_str()], read_user)
            .optional()?;

        Ok(user)
    }

    /// Whether a username or email is already registered
    pub fn identifier_taken(&self, username: &str, email: &str) -> Result<bool> {
        let taken = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1 OR email = ?2)",
            params![username, email],
            |row| row.get(0),
        )?;
        Ok(taken)
    }

    /// Shallow-merge a profile patch into a user
    ///
    /// `None` fields keep their stored value. Returns the updated record, or
    /// `None` when no such user exists (the demo accounts have no row here).
    #[instrument(skip(self, patch))]
    pub fn apply_patch(&self, id: Uuid, patch: &ProfilePatch) -> Result<Option<UserRecord>> {
        self.conn.execute(
            "UPDATE users SET \
             full_name = COALESCE(?1, full_name), \
             phone = COALESCE(?2, phone), \
             address = COALESCE(?3, address), \
             city = COALESCE(?4, city), \
             state = COALESCE(?5, state), \
             pincode = COALESCE(?6, pincode) \
             WHERE id = ?7",
            params![
                patch.full_name,
                patch.phone,
                patch.address,
                patch.city,
                patch.state,
                patch.pincode,
                id.to_string(),
            ],
        )?;

        self.find_by_id(id)
    }

    /// All registered users in insertion order
    pub fn list(&self) -> Result<Vec<UserRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY rowid"))?;

        let users = stmt
            .query_map([], read_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(users)
    }
}
