//! Session state.
//!
//! Holds at most one active session. Created on successful login, destroyed
//! on logout, never persisted. The only in-place mutations are the
//! administrator-pushed profile patch (role, station) and clearing the
//! forced-password-change flag after a successful credential replacement.

use stationops_core::role::UserRole;
use stationops_core::station::StationScope;
use stationops_core::User;

/// Administrator-pushed profile changes, merged without a session teardown.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub role: Option<UserRole>,
    pub assigned_station: Option<StationScope>,
}

/// The process-wide current-session record.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<User>,
}

impl SessionState {
    /// No session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a session. The only way to populate the record.
    pub fn login(&mut self, user: User) {
        self.current = Some(user);
    }

    /// Clear the session unconditionally.
    pub fn logout(&mut self) {
        self.current = None;
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether the active session holds the administrator role.
    pub fn is_admin(&self) -> bool {
        matches!(
            self.current,
            Some(User {
                role: UserRole::Admin,
                ..
            })
        )
    }

    /// Merge administrator-pushed profile changes into the active session.
    /// A no-op without a session.
    pub fn apply_profile_patch(&mut self, patch: ProfilePatch) {
        if let Some(user) = self.current.as_mut() {
            if let Some(role) = patch.role {
                user.role = role;
            }
            if let Some(station) = patch.assigned_station {
                user.assigned_station = station;
            }
        }
    }

    /// Clear the forced-password-change flag after a successful credential
    /// replacement. Session-local UI state, not remote-sourced data.
    pub fn complete_password_change(&mut self) {
        if let Some(user) = self.current.as_mut() {
            user.force_change_password = false;
        }
    }
}
