//! Database value parsing utilities
//!
//! Provides error-safe decoding of stored column values.

use chrono::{DateTime, Utc};
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{IncidentStatus, Role, Severity};

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse an optional DateTime from an RFC3339 string
pub fn parse_datetime_opt(s: Option<String>) -> Result<Option<DateTime<Utc>>, SqlError> {
    s.map(|s| parse_datetime(&s)).transpose()
}

/// Decode a role column
pub fn parse_role(s: &str) -> Result<Role, SqlError> {
    Role::parse(s).ok_or_else(|| conversion_failure(format!("unknown role: {s}")))
}

/// Decode a severity column
pub fn parse_severity(s: &str) -> Result<Severity, SqlError> {
    Severity::parse(s).ok_or_else(|| conversion_failure(format!("unknown severity: {s}")))
}

/// Decode an incident status column
pub fn parse_status(s: &str) -> Result<IncidentStatus, SqlError> {
    IncidentStatus::parse(s).ok_or_else(|| conversion_failure(format!("unknown status: {s}")))
}

fn conversion_failure(message: String) -> SqlError {
    SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, message.into())
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
