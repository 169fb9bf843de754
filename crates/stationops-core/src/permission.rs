//! # Permission Gate — Single Source of Truth
//!
//! One pure predicate evaluated before every mutation and before rendering
//! administrator-only datasets. UI-level hiding of controls is a
//! convenience layer reading the same predicate, never a second rule set.
//!
//! Every `match` on [`Operation`] is exhaustive, so adding an operation
//! forces an explicit permission decision here.

use serde::{Deserialize, Serialize};

use crate::entity::User;
use crate::role::UserRole;

/// Every gated operation: all remote mutations plus the admin-only views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateTask,
    UpdateTask,
    SaveMeeting,
    SaveContact,
    UpdateUser,
    ChangePassword,
    SaveChecklistTemplate,
    SubmitChecklist,
    ViewAuditLogs,
    ViewContacts,
    ViewUserAdmin,
}

/// Whether `user` may perform `operation`. No operation is permitted
/// implicitly.
pub fn can_perform(user: &User, operation: Operation) -> bool {
    match operation {
        // Administrator-only mutations and datasets.
        Operation::CreateTask
        | Operation::UpdateUser
        | Operation::ViewAuditLogs
        | Operation::ViewContacts
        | Operation::ViewUserAdmin => user.role == UserRole::Admin,
        // Denied to the fixed view-only subset, permitted to everyone else.
        Operation::SaveChecklistTemplate | Operation::SubmitChecklist => {
            !user.role.is_read_only()
        }
        // Any authenticated session.
        Operation::UpdateTask
        | Operation::SaveMeeting
        | Operation::SaveContact
        | Operation::ChangePassword => true,
    }
}

/// Station-scoped visibility filter, applied by consuming read paths.
/// Administrators and all-station sessions see every entity; other
/// sessions only see entities whose station code matches exactly.
pub fn station_visible(user: &User, station_code: &str) -> bool {
    if user.role == UserRole::Admin {
        return true;
    }
    user.assigned_station.admits(station_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::StationScope;

    fn user(role: UserRole, scope: StationScope) -> User {
        User {
            email: "u@x.com".into(),
            name: "測試".into(),
            role,
            assigned_station: scope,
            organization: None,
            force_change_password: false,
        }
    }

    #[test]
    fn task_creation_is_admin_only() {
        assert!(can_perform(&user(UserRole::Admin, StationScope::All), Operation::CreateTask));
        for role in [UserRole::Manager, UserRole::DeptManager, UserRole::Operator] {
            assert!(!can_perform(&user(role, StationScope::All), Operation::CreateTask));
        }
    }

    #[test]
    fn admin_only_views() {
        let manager = user(UserRole::Manager, StationScope::All);
        assert!(!can_perform(&manager, Operation::ViewAuditLogs));
        assert!(!can_perform(&manager, Operation::ViewContacts));
        assert!(!can_perform(&manager, Operation::ViewUserAdmin));
        assert!(!can_perform(&manager, Operation::UpdateUser));
    }

    #[test]
    fn checklist_operations_denied_to_read_only_roles() {
        for op in [Operation::SaveChecklistTemplate, Operation::SubmitChecklist] {
            assert!(can_perform(&user(UserRole::Admin, StationScope::All), op));
            assert!(can_perform(&user(UserRole::Manager, StationScope::All), op));
            assert!(!can_perform(&user(UserRole::Operator, StationScope::All), op));
            assert!(!can_perform(&user(UserRole::DeptManager, StationScope::All), op));
        }
    }

    #[test]
    fn task_progress_and_password_open_to_all_roles() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::DeptManager, UserRole::Operator] {
            let u = user(role, StationScope::Station("ZX".into()));
            assert!(can_perform(&u, Operation::UpdateTask));
            assert!(can_perform(&u, Operation::ChangePassword));
            assert!(can_perform(&u, Operation::SaveMeeting));
        }
    }

    #[test]
    fn all_station_sentinel_admits_every_entity() {
        let u = user(UserRole::Manager, StationScope::All);
        assert!(station_visible(&u, "ZX"));
        assert!(station_visible(&u, "XM"));
    }

    #[test]
    fn scoped_non_admin_sees_only_exact_match() {
        let u = user(UserRole::Operator, StationScope::Station("ZX".into()));
        assert!(station_visible(&u, "ZX"));
        assert!(!station_visible(&u, "XM"));
    }

    #[test]
    fn admin_sees_everything_regardless_of_assignment() {
        let u = user(UserRole::Admin, StationScope::Station("ZX".into()));
        assert!(station_visible(&u, "XM"));
    }
}
