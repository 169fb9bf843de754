//! Entity normalization.
//!
//! The remote store returns shape-inconsistent payloads: the successful
//! collection may sit under a semantic key (`tasks`, `meetings`, ...) or a
//! generic `data` fallback, task rows are positional arrays while every
//! other entity uses named fields, and checklist submissions may omit the
//! station name. One pure function per entity type maps exactly the
//! documented shapes onto typed entities.
//!
//! Normalization never errors: a malformed or unsuccessful body yields an
//! empty sequence, and malformed individual elements are dropped with a
//! warning — partial data is preferable to none for a read-only list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use stationops_core::entity::{
    AuditLog, ChecklistItem, ChecklistSubmission, Contact, Meeting, Task, TaskStatus, User,
};
use stationops_core::station::{code_for_name, name_for_code};

use crate::gateway::Envelope;

const EMPTY: &[Value] = &[];

/// Number of cells in a positional task row, per the ordinal contract.
const TASK_ROW_LEN: usize = 9;

/// Extract the successful-result collection from an envelope.
///
/// Both the semantic key and the generic `data` fallback are permanently
/// supported. A bare-array body (legacy shape) is the collection itself.
/// Unsuccessful envelopes and non-array payloads yield an empty slice.
pub fn collection<'a>(envelope: &'a Envelope, key: &str) -> &'a [Value] {
    if !envelope.success {
        return EMPTY;
    }
    if let Some(rows) = envelope.body.as_array() {
        return rows;
    }
    envelope
        .body
        .get(key)
        .or_else(|| envelope.body.get("data"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(EMPTY)
}

/// Deserialize each element of a named-field collection, dropping
/// malformed elements.
fn typed<T: DeserializeOwned>(envelope: &Envelope, key: &str) -> Vec<T> {
    collection(envelope, key)
        .iter()
        .filter_map(|raw| match serde_json::from_value(raw.clone()) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(key, error = %e, "dropping malformed element");
                None
            }
        })
        .collect()
}

/// Stringify a positional cell. The store sometimes writes numbers into
/// text columns; anything else is treated as absent.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Normalize a `getTasks` response.
///
/// Rows are positional arrays with the nine-field ordinal contract:
/// uid, station name, item code, item name, deadline, status, executor,
/// last-updated, attachment reference. The station code is derived from
/// the station name through the static directory — any code carried by
/// the row itself is ignored. Rows that are not arrays, are too short, or
/// carry an unknown status are dropped.
pub fn tasks(envelope: &Envelope) -> Vec<Task> {
    collection(envelope, "tasks")
        .iter()
        .filter_map(|raw| {
            let row = match raw.as_array() {
                Some(row) if row.len() >= TASK_ROW_LEN => row,
                _ => {
                    tracing::warn!("dropping task row with wrong shape");
                    return None;
                }
            };
            let status_text = cell_text(&row[5])?;
            let Some(status) = TaskStatus::parse(&status_text) else {
                tracing::warn!(status = %status_text, "dropping task row with unknown status");
                return None;
            };
            let station_name = cell_text(&row[1])?;
            let attachment_url = cell_text(&row[8]).filter(|s| !s.is_empty());
            Some(Task {
                uid: cell_text(&row[0])?,
                station_code: code_for_name(&station_name).map(str::to_string),
                station_name,
                item_code: cell_text(&row[2])?,
                item_name: cell_text(&row[3])?,
                deadline: cell_text(&row[4])?,
                status,
                executor_email: cell_text(&row[6])?,
                last_updated: cell_text(&row[7])?,
                attachment_url,
            })
        })
        .collect()
}

/// Normalize a `getUsers` response (envelope or legacy bare array).
pub fn users(envelope: &Envelope) -> Vec<User> {
    typed(envelope, "users")
}

/// Normalize a `getMeetings` response.
pub fn meetings(envelope: &Envelope) -> Vec<Meeting> {
    typed(envelope, "meetings")
}

/// Normalize a `getContacts` response.
pub fn contacts(envelope: &Envelope) -> Vec<Contact> {
    typed(envelope, "contacts")
}

/// Normalize a `getLogs` response.
pub fn logs(envelope: &Envelope) -> Vec<AuditLog> {
    typed(envelope, "logs")
}

/// Normalize a `getChecklistTemplate` response.
pub fn checklist_template(envelope: &Envelope) -> Vec<ChecklistItem> {
    typed(envelope, "template")
}

/// Normalize a `getChecklistSubmissions` response, applying the
/// station-name repair to every element.
pub fn checklist_submissions(envelope: &Envelope) -> Vec<ChecklistSubmission> {
    typed(envelope, "submissions")
        .into_iter()
        .map(repair_station_name)
        .collect()
}

/// Backfill a submission's station name from the static directory when the
/// remote payload supplied only the code, falling back to the raw code
/// string for a code the directory does not know. Idempotent; never
/// touches the identifier or the stored results.
pub fn repair_station_name(mut submission: ChecklistSubmission) -> ChecklistSubmission {
    if submission.station_name.is_empty() {
        submission.station_name = name_for_code(&submission.station_code)
            .map(str::to_string)
            .unwrap_or_else(|| submission.station_code.clone());
    }
    submission
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stationops_core::entity::CheckStatus;
    use stationops_core::role::UserRole;

    fn envelope(body: Value) -> Envelope {
        Envelope::from_value("test", body).unwrap()
    }

    #[test]
    fn task_row_maps_ordinals_and_derives_station_code() {
        let env = envelope(json!({
            "success": true,
            "tasks": [["T1", "忠孝站", "A1", "保養", "2024-05-01", "未完成", "u@x.com", "2024-04-20", ""]]
        }));
        let tasks = tasks(&env);
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.uid, "T1");
        assert_eq!(task.station_code.as_deref(), Some("ZX"));
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.item_name, "保養");
        // Empty attachment cell means no attachment.
        assert!(task.attachment_url.is_none());
    }

    #[test]
    fn task_station_code_is_unset_for_unknown_station() {
        let env = envelope(json!({
            "success": true,
            "data": [["T2", "幽靈站", "B2", "巡檢", "2024-06-01", "進行中", "u@x.com", "2024-05-20", "https://x/f.pdf"]]
        }));
        let tasks = tasks(&env);
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].station_code.is_none());
        assert_eq!(tasks[0].attachment_url.as_deref(), Some("https://x/f.pdf"));
    }

    #[test]
    fn malformed_task_rows_are_dropped_not_fatal() {
        let env = envelope(json!({
            "success": true,
            "tasks": [
                ["T1", "忠孝站", "A1", "保養", "2024-05-01", "未完成", "u@x.com", "2024-04-20", ""],
                ["too", "short"],
                {"uid": "not-a-row"},
                ["T3", "忠孝站", "A3", "清潔", "2024-05-02", "奇怪狀態", "u@x.com", "2024-04-21", ""]
            ]
        }));
        let tasks = tasks(&env);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].uid, "T1");
    }

    #[test]
    fn unsuccessful_envelope_yields_empty() {
        let env = envelope(json!({"success": false, "tasks": [["x"]]}));
        assert!(tasks(&env).is_empty());
    }

    #[test]
    fn collection_falls_back_to_generic_data_key() {
        let semantic = envelope(json!({"success": true, "meetings": [{"id": "M1", "date": "2024-05-01", "subject": "s", "summary": "t"}]}));
        let generic = envelope(json!({"success": true, "data": [{"id": "M1", "date": "2024-05-01", "subject": "s", "summary": "t"}]}));
        assert_eq!(meetings(&semantic).len(), 1);
        assert_eq!(meetings(&generic).len(), 1);
    }

    #[test]
    fn users_accept_legacy_bare_array() {
        let env = envelope(json!([
            {"email": "a@x.com", "name": "甲", "role": "ADMIN", "assignedStation": "ALL"},
            {"email": "b@x.com", "name": "乙", "role": "NOT_A_ROLE", "assignedStation": "ZX"}
        ]));
        let users = users(&env);
        // The unknown role is dropped rather than granted permissions.
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, UserRole::Admin);
    }

    #[test]
    fn submission_station_name_backfilled_from_code() {
        let env = envelope(json!({
            "success": true,
            "submissions": [{
                "id": "S1",
                "yearMonth": "2024-05",
                "stationCode": "ZX",
                "submittedBy": "u@x.com",
                "submittedAt": "2024-05-31T10:00:00",
                "results": [{"itemId": "I1", "status": "異常", "note": "燈具故障"}]
            }]
        }));
        let subs = checklist_submissions(&env);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].station_name, "忠孝站");
        assert_eq!(subs[0].results[0].status, CheckStatus::Issue);
    }

    #[test]
    fn submission_unknown_code_falls_back_to_raw_code() {
        let env = envelope(json!({
            "success": true,
            "submissions": [{
                "id": "S2",
                "yearMonth": "2024-05",
                "stationCode": "Q9",
                "submittedBy": "u@x.com"
            }]
        }));
        let subs = checklist_submissions(&env);
        assert_eq!(subs[0].station_name, "Q9");
    }

    #[test]
    fn station_name_repair_is_idempotent() {
        let env = envelope(json!({
            "success": true,
            "submissions": [{
                "id": "S1",
                "yearMonth": "2024-05",
                "stationCode": "ZX",
                "submittedBy": "u@x.com",
                "results": [{"itemId": "I1", "status": "正常"}]
            }]
        }));
        let once = checklist_submissions(&env).remove(0);
        let twice = repair_station_name(once.clone());
        assert_eq!(once, twice);
        assert_eq!(twice.id, "S1");
        assert_eq!(twice.results.len(), 1);
    }

    #[test]
    fn repair_keeps_supplied_station_name() {
        let env = envelope(json!({
            "success": true,
            "submissions": [{
                "id": "S3",
                "yearMonth": "2024-05",
                "stationCode": "ZX",
                "stationName": "忠孝站(臨時名)",
                "submittedBy": "u@x.com"
            }]
        }));
        assert_eq!(checklist_submissions(&env)[0].station_name, "忠孝站(臨時名)");
    }

    #[test]
    fn template_and_logs_normalize_named_fields() {
        let env = envelope(json!({
            "success": true,
            "template": [{"id": "I1", "category": "環境", "content": "出入口淨空"}]
        }));
        assert_eq!(checklist_template(&env).len(), 1);

        let env = envelope(json!({
            "success": true,
            "logs": [{"id": "L1", "timestamp": "2024-05-01 10:00", "actor": "a@x.com", "action": "登入"}]
        }));
        assert_eq!(logs(&env).len(), 1);
    }
}
