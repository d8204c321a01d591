//! Active-session persistence
//!
//! At most one session projection exists at a time (single-device model), so
//! the table holds a single row that is replaced on every login.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use super::parse::{parse_role, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::SessionUser;

pub struct SessionStore<'a> {
    conn: &'a Connection,
}

impl<'a> SessionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist the session projection, replacing any previous one
    #[instrument(skip(self, user), fields(username = %user.username, role = %user.role))]
    pub fn save(&self, user: &SessionUser) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO active_session \
             (id, user_id, username, email, role, full_name, phone, saved_at) \
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.user_id.to_string(),
                user.username,
                user.email,
                user.role.as_str(),
                user.full_name,
                user.phone,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Read the persisted session projection
    pub fn load(&self) -> Result<Option<SessionUser>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, username, email, role, full_name, phone \
             FROM active_session WHERE id = 1",
        )?;

        let session = stmt
            .query_row([], |row| {
                Ok(SessionUser {
                    user_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    role: parse_role(&row.get::<_, String>(3)?)?,
                    full_name: row.get(4)?,
                    phone: row.get(5)?,
                })
            })
            .optional()?;

        Ok(session)
    }

    /// Delete the session projection; a no-op when none exists
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM active_session", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::storage::Database;
    use uuid::Uuid;

    fn sample_session(username: &str) -> SessionUser {
        SessionUser {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: Role::Citizen,
            full_name: Some("Asha Rao".to_string()),
            phone: None,
        }
    }

    #[test]
    fn test_save_and_load() {
        let db = Database::open_in_memory().unwrap();
        let store = db.session();

        assert!(store.load().unwrap().is_none());

        let session = sample_session("asha");
        store.save(&session).unwrap();

        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let db = Database::open_in_memory().unwrap();
        let store = db.session();

        store.save(&sample_session("asha")).unwrap();
        let second = sample_session("ravi");
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), Some(second));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let store = db.session();

        store.save(&sample_session("asha")).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing again must not fail
        store.clear().unwrap();
    }
}
