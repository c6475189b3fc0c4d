//! Recent audit history endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuditQuery};
use crate::models::AuditSummary;

/// `GET /api/audit?limit=N`: newest summaries first.
/// A missing limit uses the default page size; blank, non-numeric and
/// out-of-range limits are clamped by the store.
pub async fn latest(
    State(ctx): State<ApiContext>,
    query: Result<Query<AuditQuery>, QueryRejection>,
) -> Result<Json<Vec<AuditSummary>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = query.requested_limit();

    let core = ctx.core.clone();
    let summaries = tokio::task::spawn_blocking(move || core.engine().latest_audits(limit))
        .await
        .map_err(|e| ApiError::Internal(format!("audit query task failed: {e}")))?;

    Ok(Json(summaries))
}
