//! Analysis endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AnalysisResponse, Intake};

/// `POST /api/analyze`: run the full pipeline on one intake.
///
/// An intake that fails validation answers 400 with the violation list.
/// Contract violations on a computed response are reported inside the
/// 200 body.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Intake>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(intake) = payload.map_err(|e| {
        // Rejection text can echo field values; log the status only.
        tracing::debug!(status = e.status().as_u16(), "Rejected analyze payload");
        ApiError::BadRequest("invalid payload".into())
    })?;

    // The audit write may touch SQLite.
    let core = ctx.core.clone();
    let response = tokio::task::spawn_blocking(move || core.engine().analyze(&intake))
        .await
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))?;

    if response.is_invalid() {
        return Err(ApiError::ValidationFailed(response.validation_errors));
    }

    Ok(Json(response))
}
