//! Axum route handlers for the profile and readiness API.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::sites::is_job_page;
use crate::models::profile::{SaveProfileRequest, UserProfile};
use crate::profile::store::save_profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// What the host UI needs to decide whether scanning is possible.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub resume_ready: bool,
    pub style_ready: bool,
    pub page_ready: bool,
    pub ready: bool,
    pub hint: String,
}

impl StatusResponse {
    pub fn new(resume_ready: bool, style_ready: bool, page_ready: bool) -> Self {
        let hint = if !resume_ready || !style_ready {
            "Configure Profile First"
        } else if !page_ready {
            "Visit a Job Page"
        } else {
            "Scan & Optimize Now"
        };
        Self {
            resume_ready,
            style_ready,
            page_ready,
            ready: resume_ready && style_ready && page_ready,
            hint: hint.to_string(),
        }
    }
}

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, AppError> {
    state
        .profiles
        .load()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No profile saved yet".to_string()))
}

/// PUT /api/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    payload: Result<Json<SaveProfileRequest>, JsonRejection>,
) -> Result<Json<UserProfile>, AppError> {
    let Json(request) = payload?;
    let profile = save_profile(state.profiles.as_ref(), request).await?;
    Ok(Json(profile))
}

/// GET /api/status?url=...
///
/// Profile readiness plus whether the given URL looks like a job posting.
pub async fn handle_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusResponse>, AppError> {
    let profile = state.profiles.load().await?;
    let resume_ready = profile.as_ref().is_some_and(UserProfile::resume_ready);
    let style_ready = profile.as_ref().is_some_and(UserProfile::style_ready);
    let page_ready = query.url.as_deref().is_some_and(is_job_page);

    Ok(Json(StatusResponse::new(resume_ready, style_ready, page_ready)))
}
