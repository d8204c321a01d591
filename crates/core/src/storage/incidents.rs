//! Incident report storage operations

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_datetime_opt, parse_severity, parse_status, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{GeoPoint, IncidentReport, IncidentStatus};

const INCIDENT_COLUMNS: &str = "id, user_id, username, title, description, severity, \
     latitude, longitude, accuracy, media, status, created_at, updated_at";

fn read_incident(row: &Row<'_>) -> rusqlite::Result<IncidentReport> {
    Ok(IncidentReport {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        user_id: parse_uuid(&row.get::<_, String>(1)?)?,
        username: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        severity: parse_severity(&row.get::<_, String>(5)?)?,
        location: GeoPoint {
            latitude: row.get(6)?,
            longitude: row.get(7)?,
            accuracy: row.get(8)?,
        },
        media: row.get(9)?,
        status: parse_status(&row.get::<_, String>(10)?)?,
        created_at: parse_datetime(&row.get::<_, String>(11)?)?,
        updated_at: parse_datetime_opt(row.get::<_, Option<String>>(12)?)?,
    })
}

pub struct IncidentStore<'a> {
    conn: &'a Connection,
}

impl<'a> IncidentStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Store a new incident report
    #[instrument(skip(self, incident), fields(id = %incident.id, severity = %incident.severity))]
    pub fn create(&self, incident: &IncidentReport) -> Result<()> {
        self.conn.execute(
            "INSERT INTO incidents (id, user_id, username, title, description, severity, \
             latitude, longitude, accuracy, media, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                incident.id.to_string(),
                incident.user_id.to_string(),
                incident.username,
                incident.title,
                incident.description,
                incident.severity.as_str(),
                incident.location.latitude,
                incident.location.longitude,
                incident.location.accuracy,
                incident.media,
                incident.status.as_str(),
                incident.created_at.to_rfc3339(),
                incident.updated_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Find incident by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<IncidentReport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents WHERE id = ?1"
        ))?;

        let incident = stmt
            .query_row(params![id.to_string()], read_incident)
            .optional()?;

        Ok(incident)
    }

    /// A submitter's incidents in insertion order
    #[instrument(skip(self))]
    pub fn list_for_user(&self, user_id: Uuid) -> Result<Vec<IncidentReport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents WHERE user_id = ?1 ORDER BY rowid"
        ))?;

        let incidents = stmt
            .query_map(params![user_id.to_string()], read_incident)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(incidents)
    }

    /// All incidents in insertion order
    pub fn list(&self) -> Result<Vec<IncidentReport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents ORDER BY rowid"
        ))?;

        let incidents = stmt
            .query_map([], read_incident)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(incidents)
    }

    /// Overwrite an incident's status and stamp `updated_at`
    ///
    /// Returns the updated record, or `None` when no such incident exists;
    /// nothing is written in that case.
    #[instrument(skip(self))]
    pub fn update_status(
        &self,
        id: Uuid,
        status: IncidentStatus,
    ) -> Result<Option<IncidentReport>> {
        let updated = self.conn.execute(
            "UPDATE incidents SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![
                status.as_str(),
                Utc::now().to_rfc3339(),
                id.to_string(),
            ],
        )?;

        if updated == 0 {
            return Ok(None);
        }

        self.find_by_id(id)
    }
}
