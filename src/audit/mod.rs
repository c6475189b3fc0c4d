//! Audit recording: redaction, the store contract, and its in-memory
//! and SQLite backends.

pub mod redact;
pub mod sqlite;
pub mod store;

pub use redact::redact_patient_ref;
pub use sqlite::SqliteAuditStore;
pub use store::{
    resolve_limit, AuditEntry, AuditError, AuditStore, MemoryAuditStore, DEFAULT_PAGE_SIZE,
    DEFAULT_RETENTION,
};
