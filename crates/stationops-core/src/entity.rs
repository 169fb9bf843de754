//! # Canonical Entities
//!
//! Typed entities as consumed by the presentation layer. The remote store
//! is loosely typed and inconsistent about field presence, so entity
//! structs use `#[serde(default)]` for everything the store has been
//! observed to omit; `deny_unknown_fields` is intentionally not used
//! anywhere. Task rows never deserialize directly — they arrive as
//! positional arrays and are assembled by the normalizer.

use serde::{Deserialize, Serialize};

use crate::role::UserRole;
use crate::station::StationScope;

/// An authenticated user record from the remote user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Assigned station, or [`StationScope::All`] for unrestricted access.
    pub assigned_station: StationScope,
    #[serde(default)]
    pub organization: Option<String>,
    /// When set, the user must replace their credential before performing
    /// other mutations.
    #[serde(default)]
    pub force_change_password: bool,
}

/// Progress status of a task. Wire values are the display strings the
/// remote store records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "未完成")]
    NotStarted,
    #[serde(rename = "進行中")]
    InProgress,
    #[serde(rename = "已完成")]
    Completed,
}

impl TaskStatus {
    /// Parse a raw status cell from a task row.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "未完成" => Some(TaskStatus::NotStarted),
            "進行中" => Some(TaskStatus::InProgress),
            "已完成" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// The display string recorded by the remote store.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "未完成",
            TaskStatus::InProgress => "進行中",
            TaskStatus::Completed => "已完成",
        }
    }
}

/// A maintenance/work task scoped to one station.
///
/// `station_code` is always derived from `station_name` through the static
/// directory; it is `None` when the directory has no entry for the name,
/// never a value copied from the remote row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub uid: String,
    pub station_name: String,
    #[serde(default)]
    pub station_code: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub deadline: String,
    pub status: TaskStatus,
    pub executor_email: String,
    pub last_updated: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

/// A meeting or site-survey record. Append-only from the client's
/// perspective: there is no update or delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub date: String,
    pub subject: String,
    pub summary: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

/// A contact-directory entry. Beyond the identifier the schema is
/// organization-specific, so the remaining fields are carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// One inspection item of the monthly checklist template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub category: String,
    pub content: String,
}

/// Outcome of checking one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "正常")]
    Normal,
    #[serde(rename = "異常")]
    Issue,
    #[serde(rename = "不適用")]
    NotApplicable,
}

/// Per-item result inside a checklist submission. Category and content are
/// denormalized copies of the template item so a submission stays readable
/// after the template is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub item_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub content: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// One station's completed checklist for one year-month period.
///
/// `station_name` must never be empty for display; the normalizer backfills
/// it from the station directory when the remote payload carries only the
/// code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSubmission {
    pub id: String,
    /// Submission period, `YYYY-MM`.
    pub year_month: String,
    pub station_code: String,
    #[serde(default)]
    pub station_name: String,
    pub submitted_by: String,
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub results: Vec<CheckResult>,
}

/// A read-only audit-log row. Administrator-visible only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub timestamp: String,
    pub actor: String,
    pub action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_parse_is_closed() {
        assert_eq!(TaskStatus::parse("未完成"), Some(TaskStatus::NotStarted));
        assert_eq!(TaskStatus::parse("進行中"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("已完成"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse("done"), None);
    }

    #[test]
    fn user_tolerates_missing_optionals() {
        let user: User = serde_json::from_value(serde_json::json!({
            "email": "u@x.com",
            "name": "測試",
            "role": "MANAGER",
            "assignedStation": "ZX"
        }))
        .unwrap();
        assert_eq!(user.assigned_station, StationScope::Station("ZX".into()));
        assert!(!user.force_change_password);
        assert!(user.organization.is_none());
    }

    #[test]
    fn contact_carries_arbitrary_fields() {
        let contact: Contact = serde_json::from_value(serde_json::json!({
            "id": "C1",
            "unit": "機電課",
            "phone": "02-1234"
        }))
        .unwrap();
        assert_eq!(contact.id, "C1");
        assert_eq!(contact.fields["unit"], "機電課");
    }

    #[test]
    fn submission_defaults_station_name_to_empty() {
        let sub: ChecklistSubmission = serde_json::from_value(serde_json::json!({
            "id": "S1",
            "yearMonth": "2024-05",
            "stationCode": "ZX",
            "submittedBy": "u@x.com"
        }))
        .unwrap();
        assert!(sub.station_name.is_empty());
        assert!(sub.results.is_empty());
    }
}
