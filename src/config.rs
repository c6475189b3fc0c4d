use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::audit::DEFAULT_RETENTION;

/// Application-level constants
pub const APP_NAME: &str = "ClinAssist";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_BIND: &str = "CLINASSIST_BIND";
pub const ENV_AUDIT_DB: &str = "CLINASSIST_AUDIT_DB";
pub const ENV_AUDIT_RETENTION: &str = "CLINASSIST_AUDIT_RETENTION";
pub const ENV_REFERENCE_DIR: &str = "CLINASSIST_REFERENCE_DIR";

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// `CLINASSIST_AUDIT_DB` value selecting the file under the app data dir.
pub const AUDIT_DB_DEFAULT_LOCATION: &str = "default";

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "clinassist_lib=debug,tower_http=debug,info"
    } else {
        "clinassist_lib=info,warn"
    }
}

/// Get the application data directory (~/ClinAssist/).
/// `None` when the home directory cannot be determined.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Default location of the SQLite audit log.
pub fn default_audit_db_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("audit.db"))
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid bind address {0}: {1}")]
    InvalidBind(String, String),

    #[error("Invalid audit retention {0}: must be an integer of at least 1")]
    InvalidRetention(String),

    #[error("Cannot resolve the default audit database location")]
    NoDataDir,
}

/// Where audit summaries are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditBackend {
    Memory,
    Sqlite(PathBuf),
}

/// Service settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub audit_backend: AuditBackend,
    pub audit_retention: usize,
    /// `None` uses the built-in interaction table.
    pub reference_dir: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_text = get(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBind(bind_text.clone(), e.to_string()))?;

        let audit_retention = match get(ENV_AUDIT_RETENTION) {
            None => DEFAULT_RETENTION,
            Some(text) => match text.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ConfigError::InvalidRetention(text)),
            },
        };

        let audit_backend = match get(ENV_AUDIT_DB) {
            None => AuditBackend::Memory,
            Some(value) if value == AUDIT_DB_DEFAULT_LOCATION => {
                AuditBackend::Sqlite(default_audit_db_path().ok_or(ConfigError::NoDataDir)?)
            }
            Some(path) => AuditBackend::Sqlite(PathBuf::from(path)),
        };

        Ok(Self {
            bind,
            audit_backend,
            audit_retention,
            reference_dir: get(ENV_REFERENCE_DIR).map(PathBuf::from),
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            audit_backend: AuditBackend::Memory,
            audit_retention: DEFAULT_RETENTION,
            reference_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]).unwrap(), ServiceConfig::default());
    }

    #[test]
    fn reads_all_settings() {
        let config = config_from(&[
            (ENV_BIND, "127.0.0.1:9000"),
            (ENV_AUDIT_DB, "/tmp/audit.db"),
            (ENV_AUDIT_RETENTION, "200"),
            (ENV_REFERENCE_DIR, "/etc/clinassist"),
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.audit_backend, AuditBackend::Sqlite(PathBuf::from("/tmp/audit.db")));
        assert_eq!(config.audit_retention, 200);
        assert_eq!(config.reference_dir, Some(PathBuf::from("/etc/clinassist")));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config_from(&[(ENV_AUDIT_DB, "  "), (ENV_AUDIT_RETENTION, "")]).unwrap();
        assert_eq!(config.audit_backend, AuditBackend::Memory);
        assert_eq!(config.audit_retention, DEFAULT_RETENTION);
    }

    #[test]
    fn retention_below_one_rejected() {
        for value in ["0", "-3", "many"] {
            assert_eq!(
                config_from(&[(ENV_AUDIT_RETENTION, value)]),
                Err(ConfigError::InvalidRetention(value.to_string()))
            );
        }
    }

    #[test]
    fn bad_bind_rejected() {
        assert!(matches!(
            config_from(&[(ENV_BIND, "not-an-address")]),
            Err(ConfigError::InvalidBind(_, _))
        ));
    }

    #[test]
    fn default_audit_db_under_app_data() {
        if let (Some(path), Some(dir)) = (default_audit_db_path(), app_data_dir()) {
            assert!(path.starts_with(&dir));
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
