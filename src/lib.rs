pub mod api;
pub mod audit;
pub mod config;
pub mod core_state;
pub mod db;
pub mod intelligence;
pub mod models;
mod phi_audit;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::ServiceConfig;
use core_state::{CoreState, StartupError};

/// Start the service: logging, configuration, engine, HTTP server.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        bind = %config.bind,
        backend = ?config.audit_backend,
        retention = config.audit_retention,
        "Configuration loaded"
    );

    let bind = config.bind;
    let core = Arc::new(CoreState::from_config(config)?);
    api::serve(core, bind).await
}
