//! Transport-agnostic application state.
//!
//! `CoreState` owns the analysis engine and the settings it was built
//! from. It is wrapped in `Arc` at startup and shared with the HTTP layer.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::audit::{AuditStore, MemoryAuditStore, SqliteAuditStore};
use crate::config::{AuditBackend, ConfigError, ServiceConfig};
use crate::db::DatabaseError;
use crate::intelligence::{AnalysisEngine, ClinicalReferenceData, DefaultAnalysisEngine, ReferenceError};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("Audit store unavailable: {0}")]
    AuditStore(#[from] DatabaseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct CoreState {
    engine: Arc<dyn AnalysisEngine>,
    pub config: ServiceConfig,
    started_at: Instant,
}

impl CoreState {
    pub fn new(engine: Arc<dyn AnalysisEngine>, config: ServiceConfig) -> Self {
        Self {
            engine,
            config,
            started_at: Instant::now(),
        }
    }

    /// Build the engine and its collaborators from resolved settings.
    pub fn from_config(config: ServiceConfig) -> Result<Self, StartupError> {
        let reference = match &config.reference_dir {
            Some(dir) => {
                let data = ClinicalReferenceData::load(dir)?;
                tracing::info!(
                    rules = data.interaction_rules.len(),
                    "Loaded interaction rules from reference dir"
                );
                data
            }
            None => ClinicalReferenceData::builtin(),
        };

        let audit: Arc<dyn AuditStore> = match &config.audit_backend {
            AuditBackend::Memory => Arc::new(MemoryAuditStore::new(config.audit_retention)),
            AuditBackend::Sqlite(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Arc::new(SqliteAuditStore::open(path, config.audit_retention)?)
            }
        };

        let engine = DefaultAnalysisEngine::new(reference, audit);
        Ok(Self::new(Arc::new(engine), config))
    }

    /// Built-in rules with an in-memory audit log.
    pub fn in_memory() -> Self {
        let config = ServiceConfig::default();
        let audit = Arc::new(MemoryAuditStore::new(config.audit_retention));
        let engine = DefaultAnalysisEngine::new(ClinicalReferenceData::builtin(), audit);
        Self::new(Arc::new(engine), config)
    }

    pub fn engine(&self) -> &dyn AnalysisEngine {
        self.engine.as_ref()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::models::{Intake, RiskLevel};

    #[test]
    fn in_memory_state_analyzes() {
        let core = CoreState::in_memory();
        let resp = core.engine().analyze(&Intake::default());
        assert_eq!(resp.risk_level, RiskLevel::Invalid);
    }

    #[test]
    fn from_config_with_sqlite_and_reference_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            audit_backend: AuditBackend::Sqlite(tmp.path().join("nested").join("audit.db")),
            reference_dir: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/reference")),
            ..Default::default()
        };
        let core = CoreState::from_config(config).unwrap();
        assert!(tmp.path().join("nested").join("audit.db").exists());
        assert!(core.engine().latest_audits(10).is_empty());
    }

    #[test]
    fn missing_reference_dir_fails_startup() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            reference_dir: Some(tmp.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            CoreState::from_config(config),
            Err(StartupError::Reference(_))
        ));
    }
}
