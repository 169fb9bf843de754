//! # User Roles
//!
//! The closed set of roles the remote user directory can assign. Roles are
//! a permission boundary, so this enum has no forward-compatible catch-all
//! variant: a role value this client does not know must fail to parse
//! instead of silently mapping to something with permissions attached.

use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// System administrator: full access, including user administration,
    /// audit logs, and the contact directory.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Station manager: day-to-day task and checklist operations.
    #[serde(rename = "MANAGER")]
    Manager,
    /// Department manager: read-only oversight role.
    #[serde(rename = "MANAGER_DEPT")]
    DeptManager,
    /// On-site operator: read-only role.
    #[serde(rename = "OPERATOR")]
    Operator,
}

impl UserRole {
    /// Whether this role is part of the fixed view-only subset. Read-only
    /// roles may not edit checklist templates or create submissions.
    pub fn is_read_only(self) -> bool {
        match self {
            UserRole::Admin | UserRole::Manager => false,
            UserRole::DeptManager | UserRole::Operator => true,
        }
    }
}
