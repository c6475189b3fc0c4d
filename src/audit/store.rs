use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{AuditSummary, RiskLevel};

use super::redact::redact_patient_ref;

/// Maximum summaries kept when no retention is configured.
pub const DEFAULT_RETENTION: usize = 50;

/// Page size used when a caller asks for an out-of-range limit.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Audit store lock poisoned")]
    LockFailed,

    #[error("Audit database error: {0}")]
    Database(#[from] DatabaseError),
}

/// One audit write. The patient reference is redacted on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub audit_id: Uuid,
    pub patient_ref: String,
    pub complaint: String,
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        audit_id: Uuid,
        at: DateTime<Utc>,
        patient_name: &str,
        complaint: &str,
        risk_level: RiskLevel,
        risk_score: i32,
    ) -> Self {
        Self {
            audit_id,
            patient_ref: redact_patient_ref(patient_name),
            complaint: complaint.trim().to_string(),
            risk_level,
            risk_score,
            at,
        }
    }

    pub fn into_summary(self) -> AuditSummary {
        AuditSummary {
            audit_id: self.audit_id,
            patient_ref: self.patient_ref,
            complaint: self.complaint,
            risk_level: self.risk_level,
            risk_score: self.risk_score,
            at: self.at,
        }
    }
}

/// Append-only audit log. Implementations must be safe under
/// concurrent `insert` and `latest` calls.
pub trait AuditStore: Send + Sync {
    fn insert(&self, entry: AuditEntry) -> Result<AuditSummary, AuditError>;

    /// Newest first, never more than the store's retention.
    fn latest(&self, limit: usize) -> Result<Vec<AuditSummary>, AuditError>;

    /// Maximum number of summaries the store keeps.
    fn retention(&self) -> usize;
}

/// Clamp a requested page size. `0` or anything above the retention
/// window falls back to the default page size.
pub fn resolve_limit(requested: usize, retention: usize) -> usize {
    if requested == 0 || requested > retention {
        DEFAULT_PAGE_SIZE.min(retention)
    } else {
        requested
    }
}

/// In-process ring buffer. Oldest entries are evicted once the
/// retention window is exceeded.
pub struct MemoryAuditStore {
    entries: RwLock<VecDeque<AuditSummary>>,
    retention: usize,
}

impl MemoryAuditStore {
    pub fn new(retention: usize) -> Self {
        let retention = retention.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(retention)),
            retention,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> Result<usize, AuditError> {
        let entries = self.entries.read().map_err(|_| AuditError::LockFailed)?;
        Ok(entries.len())
    }
}

impl Default for MemoryAuditStore {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl AuditStore for MemoryAuditStore {
    fn insert(&self, entry: AuditEntry) -> Result<AuditSummary, AuditError> {
        let summary = entry.into_summary();
        let mut entries = self.entries.write().map_err(|_| AuditError::LockFailed)?;
        entries.push_back(summary.clone());
        while entries.len() > self.retention {
            entries.pop_front();
        }
        Ok(summary)
    }

    fn latest(&self, limit: usize) -> Result<Vec<AuditSummary>, AuditError> {
        let limit = resolve_limit(limit, self.retention);
        let entries = self.entries.read().map_err(|_| AuditError::LockFailed)?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }

    fn retention(&self) -> usize {
        self.retention
    }
}
