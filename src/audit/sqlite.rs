use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::models::AuditSummary;

use super::store::{resolve_limit, AuditEntry, AuditError, AuditStore};

/// Durable audit store. One connection behind a mutex; each insert is
/// followed by a prune to the retention window.
pub struct SqliteAuditStore {
    conn: Mutex<Connection>,
    retention: usize,
}

impl SqliteAuditStore {
    pub fn open(path: &Path, retention: usize) -> Result<Self, DatabaseError> {
        let conn = db::open_database(path)?;
        let rows = db::count_audit_summaries(&conn)?;
        tracing::info!(retention, rows, "Opened SQLite audit store");
        Ok(Self::with_connection(conn, retention))
    }

    pub fn open_in_memory(retention: usize) -> Result<Self, DatabaseError> {
        Ok(Self::with_connection(db::open_memory_database()?, retention))
    }

    fn with_connection(conn: Connection, retention: usize) -> Self {
        Self {
            conn: Mutex::new(conn),
            retention: retention.max(1),
        }
    }
}

impl AuditStore for SqliteAuditStore {
    fn insert(&self, entry: AuditEntry) -> Result<AuditSummary, AuditError> {
        let summary = entry.into_summary();
        let conn = self.conn.lock().map_err(|_| AuditError::LockFailed)?;
        db::insert_audit_summary(&conn, &summary)?;
        let pruned = db::prune_audit_summaries(&conn, self.retention)?;
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned audit rows past retention");
        }
        Ok(summary)
    }

    fn latest(&self, limit: usize) -> Result<Vec<AuditSummary>, AuditError> {
        let limit = resolve_limit(limit, self.retention);
        let conn = self.conn.lock().map_err(|_| AuditError::LockFailed)?;
        Ok(db::latest_audit_summaries(&conn, limit)?)
    }

    fn retention(&self) -> usize {
        self.retention
    }
}
