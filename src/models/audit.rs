use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::RiskLevel;

/// Redacted, immutable record of one completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub audit_id: Uuid,
    /// First character plus mask; never the full name.
    pub patient_ref: String,
    pub complaint: String,
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub at: DateTime<Utc>,
}
