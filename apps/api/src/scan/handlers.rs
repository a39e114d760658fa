//! Axum route handler for the scan flow.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::extractor::PageSnapshot;
use crate::extraction::inspector::HtmlPageInspector;
use crate::models::optimization::OptimizationResult;
use crate::scan::session::ScanSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub url: String,
    pub html: String,
}

/// POST /api/scan
///
/// Full flow for the current page: stored profile + extracted job
/// description → optimizer.
pub async fn handle_scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<OptimizationResult>, AppError> {
    let Json(request) = payload?;
    let inspector = HtmlPageInspector::new(PageSnapshot::new(request.url, request.html));
    let session = ScanSession::new(state.profiles.as_ref(), state.optimizer.as_ref());
    let result = session.run(&inspector).await?;
    Ok(Json(result))
}
