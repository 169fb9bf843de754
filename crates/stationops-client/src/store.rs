//! Application store.
//!
//! The single authoritative copy of the session and every entity
//! collection. Presentation reads snapshots through the store's accessors;
//! no component holds its own copy. Collection state is only ever replaced
//! wholesale by the latest successful read.
//!
//! Each refresh is tagged with a monotonically increasing sequence number
//! per collection, and a completion older than the latest dispatched
//! request for that collection is discarded — a slow, stale read can no
//! longer overwrite fresher data.

use stationops_core::entity::{
    AuditLog, ChecklistItem, ChecklistSubmission, Contact, Meeting, Task, User,
};
use stationops_core::permission::station_visible;

use crate::session::SessionState;

/// Sequence tag for one dispatched refresh of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// One entity collection with refresh sequencing.
#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    latest_dispatched: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            latest_dispatched: 0,
        }
    }
}

impl<T> Collection<T> {
    /// Tag a new refresh. Must be called at dispatch time, before the
    /// network call is issued.
    pub fn begin(&mut self) -> RefreshTicket {
        self.latest_dispatched += 1;
        RefreshTicket(self.latest_dispatched)
    }

    /// Replace the collection wholesale with a completed refresh's items.
    /// A completion older than the latest dispatched refresh is discarded;
    /// returns whether the items were applied.
    pub fn apply(&mut self, ticket: RefreshTicket, items: Vec<T>) -> bool {
        if ticket.0 < self.latest_dispatched {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_dispatched,
                "discarding stale refresh"
            );
            return false;
        }
        self.items = items;
        true
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

/// Centralized session and collection state, exposed through a narrow
/// mutation API (tickets in, wholesale replacement out).
#[derive(Debug, Default)]
pub struct SyncStore {
    pub session: SessionState,
    pub users: Collection<User>,
    pub tasks: Collection<Task>,
    pub meetings: Collection<Meeting>,
    pub contacts: Collection<Contact>,
    pub logs: Collection<AuditLog>,
    pub checklist_template: Collection<ChecklistItem>,
    pub checklist_submissions: Collection<ChecklistSubmission>,
}

impl SyncStore {
    /// Empty store, no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks admitted by the active session's station scope. Tasks whose
    /// station code could not be derived are only visible to unrestricted
    /// sessions.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let Some(user) = self.session.current() else {
            return Vec::new();
        };
        self.tasks
            .items()
            .iter()
            .filter(|t| station_visible(user, t.station_code.as_deref().unwrap_or("")))
            .collect()
    }

    /// Checklist submissions admitted by the active session's station scope.
    pub fn visible_checklist_submissions(&self) -> Vec<&ChecklistSubmission> {
        let Some(user) = self.session.current() else {
            return Vec::new();
        };
        self.checklist_submissions
            .items()
            .iter()
            .filter(|s| station_visible(user, &s.station_code))
            .collect()
    }
}
