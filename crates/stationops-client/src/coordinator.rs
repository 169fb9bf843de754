//! Mutation coordinator and read-refresh orchestration.
//!
//! [`SyncClient`] is the only path through which remote state changes.
//! Every mutation runs the same sequence: verify the session and the
//! permission gate, encode the attachment (if any), dispatch the command,
//! and on success re-fetch the affected collection. Local state is never
//! patched speculatively — a successful write is followed by a full
//! refresh so client state cannot diverge from the remote store. The one
//! exception is the forced-password-change flag, which is session-local UI
//! state and is cleared without a round trip.
//!
//! Read refreshes degrade gracefully: transport faults, malformed bodies,
//! and explicit unsuccessful results all leave the collection empty under
//! that read's ticket and are warn-logged, never surfaced as errors.

use serde::Serialize;
use serde_json::{json, Value};

use stationops_core::entity::{CheckResult, ChecklistItem, TaskStatus, User};
use stationops_core::permission::{can_perform, Operation};
use stationops_core::sha256_hex;

use crate::config::ClientConfig;
use crate::error::SyncError;
use crate::file::{self, Attachment, EncodedFile};
use crate::gateway::RemoteGateway;
use crate::normalize;
use crate::store::SyncStore;

/// Fields of a new meeting record. The attachment travels separately.
#[derive(Debug, Clone, Serialize)]
pub struct NewMeeting {
    pub date: String,
    pub subject: String,
    pub summary: String,
}

/// A checklist submission draft for the current period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistDraft {
    /// Submission period, `YYYY-MM`.
    pub year_month: String,
    pub station_code: String,
    pub results: Vec<CheckResult>,
}

/// The synchronization client: gateway, configuration, and the
/// authoritative store.
#[derive(Debug)]
pub struct SyncClient {
    gateway: RemoteGateway,
    config: ClientConfig,
    store: SyncStore,
}

impl SyncClient {
    /// Build a client from configuration with an empty store.
    pub fn new(config: ClientConfig) -> Result<Self, SyncError> {
        Ok(Self {
            gateway: RemoteGateway::new(&config)?,
            config,
            store: SyncStore::new(),
        })
    }

    /// Read access to the store for presentation snapshots.
    pub fn store(&self) -> &SyncStore {
        &self.store
    }

    /// Establish the session after a successful login.
    pub fn login(&mut self, user: User) {
        self.store.session.login(user);
    }

    /// Destroy the session.
    pub fn logout(&mut self) {
        self.store.session.logout();
    }

    /// Session plus gate check shared by every mutation. Fails fast with
    /// an authorization error before any network activity.
    fn authorize(&self, operation: Operation) -> Result<&User, SyncError> {
        let user = self.store.session.current().ok_or(SyncError::NoSession)?;
        if !can_perform(user, operation) {
            return Err(SyncError::Unauthorized { operation });
        }
        Ok(user)
    }

    // ── Read refreshes ────────────────────────────────────────────────

    /// Refresh the user directory (`getUsers`).
    pub async fn refresh_users(&mut self) {
        let ticket = self.store.users.begin();
        let items = match self.gateway.query("getUsers", &[]).await {
            Ok(envelope) => normalize::users(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getUsers failed, applying empty collection");
                Vec::new()
            }
        };
        self.store.users.apply(ticket, items);
    }

    /// Refresh the task list (`getTasks`) with the session-derived station
    /// filter. Without a session there is nothing to scope by, so no
    /// request is issued.
    pub async fn refresh_tasks(&mut self) {
        let filter = match self.store.session.current() {
            Some(user) => user.assigned_station.task_filter(),
            None => return,
        };
        let ticket = self.store.tasks.begin();
        let items = match self.gateway.query("getTasks", &[("station", filter)]).await {
            Ok(envelope) => normalize::tasks(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getTasks failed, applying empty collection");
                Vec::new()
            }
        };
        self.store.tasks.apply(ticket, items);
    }

    /// Refresh meeting records (`getMeetings`).
    pub async fn refresh_meetings(&mut self) {
        let ticket = self.store.meetings.begin();
        let items = match self.gateway.query("getMeetings", &[]).await {
            Ok(envelope) => normalize::meetings(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getMeetings failed, applying empty collection");
                Vec::new()
            }
        };
        self.store.meetings.apply(ticket, items);
    }

    /// Refresh the contact directory (`getContacts`). Administrator-only
    /// dataset; non-admin sessions issue no request.
    pub async fn refresh_contacts(&mut self) {
        if self.authorize(Operation::ViewContacts).is_err() {
            return;
        }
        let ticket = self.store.contacts.begin();
        let items = match self.gateway.query("getContacts", &[]).await {
            Ok(envelope) => normalize::contacts(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getContacts failed, applying empty collection");
                Vec::new()
            }
        };
        self.store.contacts.apply(ticket, items);
    }

    /// Refresh the audit log (`getLogs`). Administrator-only dataset;
    /// non-admin sessions issue no request.
    pub async fn refresh_logs(&mut self) {
        if self.authorize(Operation::ViewAuditLogs).is_err() {
            return;
        }
        let ticket = self.store.logs.begin();
        let items = match self.gateway.query("getLogs", &[]).await {
            Ok(envelope) => normalize::logs(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getLogs failed, applying empty collection");
                Vec::new()
            }
        };
        self.store.logs.apply(ticket, items);
    }

    /// Refresh checklist submissions and the checklist template
    /// concurrently. The two reads are independent: a failure of either
    /// degrades that collection to empty without blocking the other.
    pub async fn refresh_checklist(&mut self) {
        let submission_ticket = self.store.checklist_submissions.begin();
        let template_ticket = self.store.checklist_template.begin();

        let (submissions, template) = tokio::join!(
            self.gateway.query("getChecklistSubmissions", &[]),
            self.gateway.query("getChecklistTemplate", &[]),
        );

        let submissions = match submissions {
            Ok(envelope) => normalize::checklist_submissions(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getChecklistSubmissions failed, applying empty collection");
                Vec::new()
            }
        };
        let template = match template {
            Ok(envelope) => normalize::checklist_template(&envelope),
            Err(e) => {
                tracing::warn!(error = %e, "getChecklistTemplate failed, applying empty collection");
                Vec::new()
            }
        };

        self.store
            .checklist_submissions
            .apply(submission_ticket, submissions);
        self.store.checklist_template.apply(template_ticket, template);
    }

    // ── Mutations ─────────────────────────────────────────────────────

    /// Publish a new task (`createTask`). Administrator only.
    pub async fn create_task(&mut self, task_data: Value) -> Result<(), SyncError> {
        let admin_email = self.authorize(Operation::CreateTask)?.email.clone();
        self.gateway
            .command(
                "createTask",
                json!({ "adminEmail": admin_email, "taskData": task_data }),
            )
            .await?;
        self.refresh_tasks().await;
        Ok(())
    }

    /// Update a task's progress (`updateTask`), optionally replacing its
    /// attachment. The attachment is encoded (and size-checked) before any
    /// network call.
    pub async fn update_task(
        &mut self,
        uid: &str,
        status: TaskStatus,
        current_attachment_url: Option<&str>,
        attachment: Option<Attachment>,
    ) -> Result<(), SyncError> {
        let user_email = self.authorize(Operation::UpdateTask)?.email.clone();
        let encoded = self.encode_attachment(attachment).await?;

        let mut payload = json!({
            "userEmail": user_email,
            "uid": uid,
            "status": status.as_str(),
            "folderId": &self.config.upload_folder_id,
        });
        if let Some(url) = current_attachment_url {
            payload["currentAttachmentUrl"] = json!(url);
        }
        if let Some(file) = encoded {
            payload["file"] = serde_json::to_value(&file).unwrap_or(Value::Null);
        }

        self.gateway.command("updateTask", payload).await?;
        self.refresh_tasks().await;
        Ok(())
    }

    /// Append a meeting record (`saveMeeting`), optionally with an
    /// attachment.
    pub async fn save_meeting(
        &mut self,
        meeting: NewMeeting,
        attachment: Option<Attachment>,
    ) -> Result<(), SyncError> {
        let user_email = self.authorize(Operation::SaveMeeting)?.email.clone();
        let encoded = self.encode_attachment(attachment).await?;

        let mut payload = json!({
            "userEmail": user_email,
            "data": meeting,
            "folderId": &self.config.upload_folder_id,
        });
        if let Some(file) = encoded {
            payload["file"] = serde_json::to_value(&file).unwrap_or(Value::Null);
        }

        self.gateway.command("saveMeeting", payload).await?;
        self.refresh_meetings().await;
        Ok(())
    }

    /// Upsert a contact-directory entry (`saveContact`).
    pub async fn save_contact(&mut self, contact: Value) -> Result<(), SyncError> {
        let user_email = self.authorize(Operation::SaveContact)?.email.clone();
        self.gateway
            .command(
                "saveContact",
                json!({ "userEmail": user_email, "data": contact }),
            )
            .await?;
        self.refresh_contacts().await;
        Ok(())
    }

    /// Update another user's record (`updateUser`). Administrator only.
    pub async fn update_user(&mut self, target_email: &str, updates: Value) -> Result<(), SyncError> {
        let admin_email = self.authorize(Operation::UpdateUser)?.email.clone();
        self.gateway
            .command(
                "updateUser",
                json!({
                    "adminEmail": admin_email,
                    "targetEmail": target_email,
                    "updates": updates,
                }),
            )
            .await?;
        self.refresh_users().await;
        Ok(())
    }

    /// Self-registration (`registerUser`). The one mutation that precedes
    /// a session.
    pub async fn register_user(
        &mut self,
        name: &str,
        email: &str,
        organization: &str,
    ) -> Result<(), SyncError> {
        self.gateway
            .command(
                "registerUser",
                json!({ "user": { "name": name, "email": email, "organization": organization } }),
            )
            .await?;
        Ok(())
    }

    /// Replace the session's credential (`changePassword`). Only the
    /// one-way digest of the new credential is transmitted — the plaintext
    /// never leaves the process. On success the forced-password-change
    /// flag is cleared locally without a further round trip.
    pub async fn change_password(&mut self, new_password: &str) -> Result<(), SyncError> {
        let email = self.authorize(Operation::ChangePassword)?.email.clone();
        let digest = sha256_hex(new_password);
        self.gateway
            .command(
                "changePassword",
                json!({ "email": email, "newPassword": digest }),
            )
            .await?;
        self.store.session.complete_password_change();
        Ok(())
    }

    /// Replace the checklist template wholesale (`saveChecklistTemplate`).
    /// Denied to read-only roles.
    pub async fn save_checklist_template(
        &mut self,
        items: &[ChecklistItem],
    ) -> Result<(), SyncError> {
        let user_email = self
            .authorize(Operation::SaveChecklistTemplate)?
            .email
            .clone();
        self.gateway
            .command(
                "saveChecklistTemplate",
                json!({ "userEmail": user_email, "items": items }),
            )
            .await?;
        self.refresh_checklist().await;
        Ok(())
    }

    /// Submit the current period's checklist (`submitChecklist`). Denied
    /// to read-only roles.
    pub async fn submit_checklist(&mut self, draft: ChecklistDraft) -> Result<(), SyncError> {
        let user_email = self.authorize(Operation::SubmitChecklist)?.email.clone();
        self.gateway
            .command(
                "submitChecklist",
                json!({ "userEmail": user_email, "data": draft }),
            )
            .await?;
        self.refresh_checklist().await;
        Ok(())
    }

    /// Encode an optional attachment, enforcing the size ceiling before
    /// any network activity.
    async fn encode_attachment(
        &self,
        attachment: Option<Attachment>,
    ) -> Result<Option<EncodedFile>, SyncError> {
        match attachment {
            Some(attachment) => file::encode(attachment).await.map(Some),
            None => Ok(None),
        }
    }
}
