//! Device snapshot interchange
//!
//! The phone app persisted exactly three JSON records: `session`,
//! `registered_users`, and `incidents`. A snapshot captures or restores the
//! whole store in that shape, so data exported from a device can be imported
//! here and vice versa.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::Result;
use crate::models::{IncidentReport, SessionUser, UserRecord};
use crate::storage::Storage;

/// A full copy of the persisted state, in the device key layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub session: Option<SessionUser>,
    #[serde(default)]
    pub registered_users: Vec<UserRecord>,
    #[serde(default)]
    pub incidents: Vec<IncidentReport>,
}

/// What a restore actually inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub users_added: usize,
    pub incidents_added: usize,
    pub session_replaced: bool,
}

impl Snapshot {
    /// Capture the whole store
    pub fn capture<S: Storage>(store: &S) -> Result<Self> {
        Ok(Self {
            session: store.load_session()?,
            registered_users: store.list_users()?,
            incidents: store.list_incidents()?,
        })
    }

    /// Insert every record whose id is not already present
    ///
    /// The carried session, if any, replaces the current one.
    #[instrument(skip(self, store), fields(users = self.registered_users.len(), incidents = self.incidents.len()))]
    pub fn restore<S: Storage>(&self, store: &S) -> Result<RestoreSummary> {
        let mut summary = RestoreSummary::default();

        for user in &self.registered_users {
            if store.find_user_by_id(user.id)?.is_none() {
                store.create_user(user)?;
                summary.users_added += 1;
            }
        }

        for incident in &self.incidents {
            if store.find_incident_by_id(incident.id)?.is_none() {
                store.create_incident(incident)?;
                summary.incidents_added += 1;
            }
        }

        if let Some(session) = &self.session {
            store.save_session(session)?;
            summary.session_replaced = true;
        }

        info!(
            users = summary.users_added,
            incidents = summary.incidents_added,
            "Snapshot restored"
        );
        Ok(summary)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as a JSON file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a snapshot from a JSON file
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        GeoPoint, IncidentDraft, IncidentReport, NewUser, Role, Severity, UserRecord,
    };
    use crate::storage::Database;

    fn populate(db: &Database) -> (UserRecord, IncidentReport) {
        let user = UserRecord::from_registration(
            NewUser {
                username: "asha".to_string(),
                email: "asha@example.com".to_string(),
                password: "unused".to_string(),
                role: Role::Citizen,
                full_name: "Asha Rao".to_string(),
                phone: "9876543210".to_string(),
                address: "12 Marine Drive".to_string(),
                city: "Mumbai".to_string(),
                state: "Maharashtra".to_string(),
                pincode: "400001".to_string(),
                registration_id: None,
            },
            "$argon2id$stub".to_string(),
        );
        db.users().create(&user).unwrap();

        let incident = IncidentReport::from_draft(
            IncidentDraft {
                title: "Flooded underpass".to_string(),
                description: "Knee-deep water at the SV Road underpass".to_string(),
                severity: Severity::Medium,
                location: GeoPoint {
                    latitude: 19.076,
                    longitude: 72.8777,
                    accuracy: Some(8.0),
                },
                media: None,
            },
            user.id,
            user.username.clone(),
        );
        db.incidents().create(&incident).unwrap();
        db.session().save(&user.session_user()).unwrap();

        (user, incident)
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let source = Database::open_in_memory().unwrap();
        let (user, incident) = populate(&source);

        let snapshot = Snapshot::capture(&source).unwrap();
        let json = snapshot.to_json().unwrap();

        let target = Database::open_in_memory().unwrap();
        let summary = Snapshot::from_json(&json)
            .unwrap()
            .restore(&target)
            .unwrap();

        assert_eq!(summary.users_added, 1);
        assert_eq!(summary.incidents_added, 1);
        assert!(summary.session_replaced);

        // Field-for-field identical after the trip through JSON and SQLite
        assert_eq!(target.users().list().unwrap(), vec![user.clone()]);
        assert_eq!(target.incidents().list().unwrap(), vec![incident]);
        assert_eq!(
            target.session().load().unwrap(),
            Some(user.session_user())
        );
    }

    #[test]
    fn test_restore_skips_existing_ids() {
        let db = Database::open_in_memory().unwrap();
        populate(&db);

        let snapshot = Snapshot::capture(&db).unwrap();
        let summary = snapshot.restore(&db).unwrap();

        assert_eq!(summary.users_added, 0);
        assert_eq!(summary.incidents_added, 0);
        assert_eq!(db.users().list().unwrap().len(), 1);
        assert_eq!(db.incidents().list().unwrap().len(), 1);
    }

    #[test]
    fn test_device_key_layout() {
        let db = Database::open_in_memory().unwrap();
        populate(&db);

        let json = Snapshot::capture(&db).unwrap().to_json().unwrap();

        // The exact keys the phone app used for its persisted records
        assert!(json.contains("\"session\""));
        assert!(json.contains("\"registered_users\""));
        assert!(json.contains("\"incidents\""));
        // Record fields stay camelCase
        assert!(json.contains("\"passwordHash\""));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_parses_minimal_device_export() {
        // A device export with no session and no incidents yet
        let snapshot = Snapshot::from_json(r#"{ "registered_users": [] }"#).unwrap();
        assert!(snapshot.session.is_none());
        assert!(snapshot.registered_users.is_empty());
        assert!(snapshot.incidents.is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let db = Database::open_in_memory().unwrap();
        populate(&db);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("floodsafe-export.json");

        let snapshot = Snapshot::capture(&db).unwrap();
        snapshot.write_to(&path).unwrap();

        let loaded = Snapshot::read_from(&path).unwrap();
        assert_eq!(loaded.registered_users, snapshot.registered_users);
        assert_eq!(loaded.incidents, snapshot.incidents);
        assert_eq!(loaded.session, snapshot.session);
    }
}
