//! Audit trail for storekeep
//!
//! Every create, update and delete of an inventory item, customer, order or
//! user is appended to `audit.log` as one JSON object per line, together with
//! the logged-in user who made the change.
//!
//! - `AuditEntry`: one operation with optional before/after snapshots
//! - `AuditLogger`: append and read the JSONL file
//! - `generate_diff`: one-line summary of the fields an update changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
