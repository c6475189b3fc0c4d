//! Shared types for the API layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::audit::DEFAULT_PAGE_SIZE;
use crate::core_state::CoreState;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Query string of `GET /api/audit`.
///
/// `limit` stays raw text so that blank, negative or oversized values reach
/// the store's clamping instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<String>,
}

impl AuditQuery {
    /// Requested page size. Non-positive and non-numeric values map to `0`,
    /// overflowing digits to `usize::MAX`. The store resolves both to the
    /// default page size.
    pub fn requested_limit(&self) -> usize {
        match self.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PAGE_SIZE,
            Some(text) => match text.parse::<i64>() {
                Ok(n) if n > 0 => usize::try_from(n).unwrap_or(0),
                Ok(_) => 0,
                // Digits beyond i64 are out of range, not malformed.
                Err(_) if text.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
                Err(_) => 0,
            },
        }
    }
}
