//! # stationops-client — Data Synchronization Layer
//!
//! The synchronization and reconciliation core of the stationops
//! facility-management client. It fetches heterogeneous, loosely-typed
//! payloads from a single remote action-dispatch endpoint, normalizes them
//! into stable typed entities, enforces role-based mutation permissions,
//! coordinates refresh-after-write, and encodes binary attachments for
//! transport.
//!
//! ## Architecture
//!
//! Presentation consumes normalized entities from [`store::SyncStore`] and
//! invokes mutations through [`coordinator::SyncClient`] — the only path
//! through which remote state changes. Every write runs:
//!
//! 1. session + permission gate (fail fast, no network on denial),
//! 2. attachment encoding with the size ceiling (fail before dispatch),
//! 3. one command dispatch (never retried),
//! 4. on success, a full re-fetch of the affected collection.
//!
//! Read failures degrade to empty collections; refresh completions are
//! sequence-tagged so a stale response never overwrites fresher data.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod file;
pub mod gateway;
pub mod normalize;
pub mod session;
pub mod store;

pub use config::{ClientConfig, ConfigError};
pub use coordinator::{ChecklistDraft, NewMeeting, SyncClient};
pub use error::SyncError;
pub use file::{Attachment, EncodedFile, MAX_ATTACHMENT_BYTES};
pub use gateway::{Envelope, RemoteGateway};
pub use session::{ProfilePatch, SessionState};
pub use store::{Collection, RefreshTicket, SyncStore};
