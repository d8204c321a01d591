//! Incident reporting service
//!
//! Citizens submit reports; NGOs triage them. Role checks go through the
//! permission matrix.

use tracing::{info, instrument};
use uuid::Uuid;

use floodsafe_core::{
    Error, IncidentDraft, IncidentReport, IncidentStatus, PermissionMatrix, ReliefAction, Result,
    SessionUser,
};

use crate::state::AppState;

fn require_session(state: &AppState) -> Result<SessionUser> {
    state.current_user().ok_or(Error::NoActiveSession)
}

fn require_permission(user: &SessionUser, action: ReliefAction) -> Result<()> {
    if PermissionMatrix::can_perform(user.role, action) {
        Ok(())
    } else {
        Err(Error::PermissionDenied(format!(
            "not permitted for role {}",
            user.role
        )))
    }
}

/// Submit a new incident report for the signed-in citizen
///
/// Stamps the id, the submitter (by value), `Pending` status, and the
/// creation time, then returns the stored record.
#[instrument(skip(state, draft), fields(title = %draft.title, severity = %draft.severity))]
pub fn submit(state: &AppState, draft: IncidentDraft) -> Result<IncidentReport> {
    let user = require_session(state)?;
    require_permission(&user, ReliefAction::SubmitIncident)?;

    let report = IncidentReport::from_draft(draft, user.user_id, user.username);
    state.db.lock().unwrap().incidents().create(&report)?;

    info!(id = %report.id, "Incident reported");
    Ok(report)
}

/// The signed-in user's own reports, oldest first
pub fn my_reports(state: &AppState) -> Result<Vec<IncidentReport>> {
    let user = require_session(state)?;
    state
        .db
        .lock()
        .unwrap()
        .incidents()
        .list_for_user(user.user_id)
}

/// Every report, oldest first (the NGO triage view)
pub fn all_reports(state: &AppState) -> Result<Vec<IncidentReport>> {
    let user = require_session(state)?;
    require_permission(&user, ReliefAction::ViewAllIncidents)?;
    state.db.lock().unwrap().incidents().list()
}

/// Move a report to a new status
///
/// NGO only; any status value may be written, there is no transition
/// ordering. `NotFound` when the id does not exist.
#[instrument(skip(state))]
pub fn set_status(state: &AppState, id: Uuid, status: IncidentStatus) -> Result<IncidentReport> {
    let user = require_session(state)?;
    require_permission(&user, ReliefAction::UpdateIncidentStatus)?;

    let updated = state
        .db
        .lock()
        .unwrap()
        .incidents()
        .update_status(id, status)?
        .ok_or_else(|| Error::NotFound(format!("incident {id}")))?;

    info!(id = %updated.id, status = %updated.status, "Incident status updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;
    use crate::navigator::NullNavigator;
    use floodsafe_core::{Database, GeoPoint, Role, Severity};
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::with_database(
            Database::open_in_memory().unwrap(),
            Arc::new(NullNavigator),
        )
    }

    fn sign_in_demo(state: &AppState, role: Role) -> SessionUser {
        let username = match role {
            Role::Citizen => "citizen1",
            Role::Ngo => "ngo1",
        };
        auth::login(state, username, "password123", role)
            .unwrap()
            .unwrap()
    }

    fn draft(title: &str) -> IncidentDraft {
        IncidentDraft {
            title: title.to_string(),
            description: "Road submerged past the market junction".to_string(),
            severity: Severity::High,
            location: GeoPoint {
                latitude: 19.076,
                longitude: 72.8777,
                accuracy: Some(10.0),
            },
            media: None,
        }
    }

    #[test]
    fn test_submit_requires_session() {
        let state = test_state();
        let result = submit(&state, draft("Flooded underpass"));
        assert!(matches!(result, Err(Error::NoActiveSession)));
    }

    #[test]
    fn test_submit_then_my_reports() {
        let state = test_state();
        let citizen = sign_in_demo(&state, Role::Citizen);

        let report = submit(&state, draft("Flooded underpass")).unwrap();
        assert_eq!(report.status, IncidentStatus::Pending);
        assert_eq!(report.user_id, citizen.user_id);
        assert_eq!(report.username, citizen.username);
        assert!(report.updated_at.is_none());

        assert_eq!(my_reports(&state).unwrap(), vec![report]);
    }

    #[test]
    fn test_ngo_cannot_submit() {
        let state = test_state();
        sign_in_demo(&state, Role::Ngo);

        let result = submit(&state, draft("Flooded underpass"));
        assert!(matches!(result, Err(Error::PermissionDenied(_))));
    }

    #[test]
    fn test_citizen_cannot_triage() {
        let state = test_state();
        sign_in_demo(&state, Role::Citizen);
        let report = submit(&state, draft("Flooded underpass")).unwrap();

        assert!(matches!(
            all_reports(&state),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(
            set_status(&state, report.id, IncidentStatus::Resolved),
            Err(Error::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_ngo_triage_flow() {
        let state = test_state();

        // A citizen reports, then an NGO takes over the device
        sign_in_demo(&state, Role::Citizen);
        let report = submit(&state, draft("Flooded underpass")).unwrap();
        auth::logout(&state).unwrap();
        sign_in_demo(&state, Role::Ngo);

        let all = all_reports(&state).unwrap();
        assert_eq!(all, vec![report.clone()]);

        let resolved = set_status(&state, report.id, IncidentStatus::Resolved).unwrap();
        assert_eq!(resolved.status, IncidentStatus::Resolved);
        assert!(resolved.updated_at.unwrap() >= resolved.created_at);
    }

    #[test]
    fn test_set_status_unknown_id() {
        let state = test_state();
        sign_in_demo(&state, Role::Ngo);

        let result = set_status(&state, Uuid::new_v4(), IncidentStatus::InProgress);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_reports_keep_submission_order() {
        let state = test_state();
        sign_in_demo(&state, Role::Citizen);

        let first = submit(&state, draft("First")).unwrap();
        let second = submit(&state, draft("Second")).unwrap();

        let titles: Vec<_> = my_reports(&state)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(titles, vec![first.id, second.id]);
    }
}
