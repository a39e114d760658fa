//! Page inspector — the request/response contract between the host UI and
//! whatever can see the page.

use serde::{Deserialize, Serialize};

use crate::extraction::extractor::{extract_job_description, ExtractionOutcome, PageSnapshot};

/// Extracted text must be longer than this to count as a job description.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

pub const NOT_FOUND_MESSAGE: &str = "Could not find a job description on this page. \
    Make sure you're viewing a specific job posting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InspectorAction {
    ExtractJobDescription,
}

/// `{success, jobDescription, source}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InspectorResponse {
    pub fn found(job_description: String, source: String) -> Self {
        Self {
            success: true,
            job_description: Some(job_description),
            source: Some(source),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            job_description: None,
            source: None,
            error: Some(error.into()),
        }
    }
}

/// Anything that can answer inspector requests for one page.
pub trait PageInspector: Send + Sync {
    fn handle(&self, action: InspectorAction) -> InspectorResponse;
}

/// Inspector backed by a captured HTML snapshot.
pub struct HtmlPageInspector {
    page: PageSnapshot,
}

impl HtmlPageInspector {
    pub fn new(page: PageSnapshot) -> Self {
        Self { page }
    }
}

impl PageInspector for HtmlPageInspector {
    fn handle(&self, action: InspectorAction) -> InspectorResponse {
        match action {
            InspectorAction::ExtractJobDescription => match extract_job_description(&self.page) {
                ExtractionOutcome::Found(block)
                    if block.text.chars().count() > MIN_JOB_DESCRIPTION_CHARS =>
                {
                    InspectorResponse::found(block.text, self.page.hostname())
                }
                _ => InspectorResponse::failed(NOT_FOUND_MESSAGE),
            },
        }
    }
}
