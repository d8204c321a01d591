//! Role-based access policy for relief operations

use crate::models::Role;

/// Actions gated by account role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReliefAction {
    // Citizen flow
    SubmitIncident,
    ViewOwnIncidents,

    // NGO coordination flow
    ViewAllIncidents,
    UpdateIncidentStatus,
    ViewReliefResources,
    ViewShipmentLedger,

    // Shared
    ViewAlerts,
}

/// Permission matrix for account roles
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if a role has permission to perform an action
    pub fn can_perform(role: Role, action: ReliefAction) -> bool {
        match action {
            // Reporting is the citizen flow
            ReliefAction::SubmitIncident => role == Role::Citizen,
            ReliefAction::ViewOwnIncidents => true,

            // Relief coordination is NGO-only
            ReliefAction::ViewAllIncidents => role == Role::Ngo,
            ReliefAction::UpdateIncidentStatus => role == Role::Ngo,
            ReliefAction::ViewReliefResources => role == Role::Ngo,
            ReliefAction::ViewShipmentLedger => role == Role::Ngo,

            // Alerts are public to any signed-in role
            ReliefAction::ViewAlerts => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_permissions() {
        assert!(PermissionMatrix::can_perform(
            Role::Citizen,
            ReliefAction::SubmitIncident
        ));
        assert!(PermissionMatrix::can_perform(
            Role::Citizen,
            ReliefAction::ViewOwnIncidents
        ));
        assert!(!PermissionMatrix::can_perform(
            Role::Citizen,
            ReliefAction::UpdateIncidentStatus
        ));
        assert!(!PermissionMatrix::can_perform(
            Role::Citizen,
            ReliefAction::ViewAllIncidents
        ));
    }

    #[test]
    fn test_ngo_permissions() {
        assert!(PermissionMatrix::can_perform(
            Role::Ngo,
            ReliefAction::UpdateIncidentStatus
        ));
        assert!(PermissionMatrix::can_perform(
            Role::Ngo,
            ReliefAction::ViewAllIncidents
        ));
        assert!(PermissionMatrix::can_perform(
            Role::Ngo,
            ReliefAction::ViewShipmentLedger
        ));
        assert!(!PermissionMatrix::can_perform(
            Role::Ngo,
            ReliefAction::SubmitIncident
        ));
    }

    #[test]
    fn test_alerts_visible_to_both_roles() {
        assert!(PermissionMatrix::can_perform(
            Role::Citizen,
            ReliefAction::ViewAlerts
        ));
        assert!(PermissionMatrix::can_perform(Role::Ngo, ReliefAction::ViewAlerts));
    }
}
