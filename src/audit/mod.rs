//! Audit logging
//!
//! Every mutation of the store is recorded with before/after values in an
//! append-only JSON-lines log.
//!
//! - `AuditEntry`: one operation on one record
//! - `AuditLogger`: appends entries to and reads them from the log file
//! - `generate_diff`: short field-level summary of what changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
