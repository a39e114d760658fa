use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Everything the optimizer needs for one run. Transient, built per user action.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRequest {
    pub master_resume: String,
    pub job_description: String,
    pub communication_style: String,
}

/// Wire form of `POST /api/optimize-resume`. Every field is optional here so
/// that a missing field surfaces as a 400 with our own message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResumeBody {
    pub master_resume: Option<String>,
    pub job_description: Option<String>,
    pub communication_style: Option<String>,
}

impl OptimizeResumeBody {
    /// Rejects the body unless all three fields are present and non-empty.
    pub fn validate(self) -> Result<OptimizationRequest, AppError> {
        match (
            non_empty(self.master_resume),
            non_empty(self.job_description),
            non_empty(self.communication_style),
        ) {
            (Some(master_resume), Some(job_description), Some(communication_style)) => {
                Ok(OptimizationRequest {
                    master_resume,
                    job_description,
                    communication_style,
                })
            }
            _ => Err(AppError::Validation(
                "Missing required fields: masterResume, jobDescription, communicationStyle"
                    .to_string(),
            )),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Bullet points produced for one request plus a status line for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub success: bool,
    pub optimized_points: Vec<String>,
    pub message: String,
}

impl OptimizationResult {
    pub fn new(optimized_points: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            optimized_points,
            message: message.into(),
        }
    }
}
