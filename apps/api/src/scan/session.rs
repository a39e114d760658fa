//! One scan: read the profile, inspect the page, optimize.

use tracing::info;

use crate::errors::AppError;
use crate::extraction::inspector::{InspectorAction, PageInspector};
use crate::models::optimization::{OptimizationRequest, OptimizationResult};
use crate::optimization::optimizer::ResumeOptimizer;
use crate::profile::store::ProfileStore;

/// Extracted text at or under this length is treated as no job description.
const MIN_SCANNED_CHARS: usize = 50;

pub const PROFILE_MISSING_MESSAGE: &str =
    "Profile data missing. Please configure your settings first.";
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not extract job description from this page. Make sure you're on a job posting page.";

/// Collaborators for a single scan. Borrowed from `AppState`.
pub struct ScanSession<'a> {
    profiles: &'a dyn ProfileStore,
    optimizer: &'a dyn ResumeOptimizer,
}

impl<'a> ScanSession<'a> {
    pub fn new(profiles: &'a dyn ProfileStore, optimizer: &'a dyn ResumeOptimizer) -> Self {
        Self {
            profiles,
            optimizer,
        }
    }

    pub async fn run(&self, inspector: &dyn PageInspector) -> Result<OptimizationResult, AppError> {
        let profile = self
            .profiles
            .load()
            .await?
            .filter(|p| !p.master_resume.is_empty() && !p.communication_style.is_empty())
            .ok_or_else(|| AppError::Validation(PROFILE_MISSING_MESSAGE.to_string()))?;

        let response = inspector.handle(InspectorAction::ExtractJobDescription);
        if !response.success {
            return Err(AppError::Extraction(
                response
                    .error
                    .unwrap_or_else(|| EXTRACTION_FAILED_MESSAGE.to_string()),
            ));
        }

        let job_description = response
            .job_description
            .filter(|text| text.chars().count() >= MIN_SCANNED_CHARS)
            .ok_or_else(|| AppError::Extraction(EXTRACTION_FAILED_MESSAGE.to_string()))?;

        info!(
            "Scanned {} chars from {}",
            job_description.chars().count(),
            response.source.as_deref().unwrap_or("unknown source")
        );

        let request = OptimizationRequest {
            master_resume: profile.master_resume,
            job_description,
            communication_style: profile.communication_style,
        };
        self.optimizer.optimize(&request).await
    }
}
