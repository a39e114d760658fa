//! Axum route handlers for the extraction API.

use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::extractor::PageSnapshot;
use crate::extraction::inspector::{
    HtmlPageInspector, InspectorAction, InspectorResponse, PageInspector,
};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub action: InspectorAction,
    pub url: String,
    pub html: String,
}

/// POST /api/extract
///
/// Answers an inspector message for the supplied page snapshot. A page with no
/// job description is still a 200 with `success: false`.
pub async fn handle_extract(
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<InspectorResponse>, AppError> {
    let Json(request) = payload?;
    let inspector = HtmlPageInspector::new(PageSnapshot::new(request.url, request.html));
    Ok(Json(inspector.handle(request.action)))
}
