use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{AuditSummary, RiskLevel};

/// Append one summary. Insertion order is kept in `seq`.
pub fn insert_audit_summary(conn: &Connection, summary: &AuditSummary) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO analysis_audit (audit_id, patient_ref, complaint, risk_level, risk_score, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            summary.audit_id.to_string(),
            summary.patient_ref,
            summary.complaint,
            summary.risk_level.as_str(),
            summary.risk_score,
            summary.at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Most recent summaries first.
pub fn latest_audit_summaries(conn: &Connection, limit: usize) -> Result<Vec<AuditSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT audit_id, patient_ref, complaint, risk_level, risk_score, recorded_at
         FROM analysis_audit ORDER BY seq DESC LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i32>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, patient_ref, complaint, level, score, at)| {
            Ok(AuditSummary {
                audit_id: Uuid::parse_str(&id).map_err(|_| DatabaseError::InvalidValue {
                    field: "audit_id".into(),
                    value: id.clone(),
                })?,
                patient_ref,
                complaint,
                risk_level: RiskLevel::from_str(&level)?,
                risk_score: score,
                at: DateTime::parse_from_rfc3339(&at)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| DatabaseError::InvalidValue {
                        field: "recorded_at".into(),
                        value: at.clone(),
                    })?,
            })
        })
        .collect()
}

/// Keep only the newest `retention` rows. Returns the number deleted.
pub fn prune_audit_summaries(conn: &Connection, retention: usize) -> Result<usize, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM analysis_audit WHERE seq NOT IN
         (SELECT seq FROM analysis_audit ORDER BY seq DESC LIMIT ?1)",
        params![retention as i64],
    )?;
    Ok(deleted)
}

pub fn count_audit_summaries(conn: &Connection) -> Result<usize, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM analysis_audit", [], |row| row.get(0))?;
    Ok(count as usize)
}
