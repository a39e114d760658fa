//! Axum route handlers for the optimization API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::optimization::{OptimizationResult, OptimizeResumeBody};
use crate::state::AppState;

/// POST /api/optimize-resume
///
/// Validates the three fields, then runs the configured optimizer once.
/// No retries: a 503 carries `retryAfter` for the caller to act on.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeResumeBody>, JsonRejection>,
) -> Result<Json<OptimizationResult>, AppError> {
    let Json(body) = payload?;
    let request = body.validate()?;

    info!(
        "Optimizing resume via {} backend (job description: {} chars)",
        state.optimizer.backend(),
        request.job_description.chars().count()
    );

    let result = state.optimizer.optimize(&request).await?;
    Ok(Json(result))
}
