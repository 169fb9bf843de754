//! # stationops-core — Foundational Types for the stationops Client
//!
//! This crate defines the types the synchronization layer and its consumers
//! share. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **The station directory is the single name↔code mapping.** Derived
//!    station codes always come from [`station`] lookups, never from remote
//!    rows.
//!
//! 2. **One [`permission::Operation`] enum, one gate.** Every mutation and
//!    every admin-only view is authorized through [`permission::can_perform`];
//!    UI gating reads the same predicate.
//!
//! 3. **Closed enums at permission boundaries.** [`UserRole`] has no
//!    catch-all variant: an unknown role fails to parse rather than
//!    acquiring permissions.

pub mod digest;
pub mod entity;
pub mod permission;
pub mod role;
pub mod station;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::sha256_hex;
pub use entity::{
    AuditLog, CheckResult, CheckStatus, ChecklistItem, ChecklistSubmission, Contact, Meeting,
    Task, TaskStatus, User,
};
pub use permission::{can_perform, station_visible, Operation};
pub use role::UserRole;
pub use station::{code_for_name, name_for_code, Station, StationScope, ALL_STATIONS_FILTER, STATIONS};
