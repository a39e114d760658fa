//! Resume optimizer — pluggable, trait-based backend that turns an
//! `OptimizationRequest` into bullet points.
//!
//! - `HostedOptimizer`: prompt → hosted text-generation model → parsed bullets.
//! - `LocalOptimizer`: keyword extraction + bullet synthesis, no network.
//!
//! `AppState` holds an `Arc<dyn ResumeOptimizer>`, chosen at startup via config.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::optimization::{OptimizationRequest, OptimizationResult};
use crate::optimization::keywords::prioritize_keywords;
use crate::optimization::prompts::PromptVariant;
use crate::optimization::synthesizer::{strip_bullet, synthesize_bullets, BULLET_PREFIX};

/// At most this many glyph-prefixed lines are kept from model output.
const MAX_BULLET_POINTS: usize = 6;
/// At most this many plain lines are kept when the model used no glyphs.
const MAX_FALLBACK_POINTS: usize = 5;
/// Plain lines must be longer than this to be taken as bullet points.
const MIN_FALLBACK_LINE_CHARS: usize = 20;

pub const NO_POINTS_MESSAGE: &str =
    "Could not generate optimized bullet points. Please try again.";

/// The optimizer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
#[async_trait]
pub trait ResumeOptimizer: Send + Sync {
    async fn optimize(&self, request: &OptimizationRequest)
        -> Result<OptimizationResult, AppError>;

    /// Short label for health output and logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HostedOptimizer
// ────────────────────────────────────────────────────────────────────────────

pub struct HostedOptimizer {
    llm: LlmClient,
    variant: PromptVariant,
}

impl HostedOptimizer {
    pub fn new(llm: LlmClient, variant: PromptVariant) -> Self {
        Self { llm, variant }
    }
}

#[async_trait]
impl ResumeOptimizer for HostedOptimizer {
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, AppError> {
        let prompt = self.variant.build_prompt(request);
        let generated = self.llm.generate(&prompt).await?;
        parse_bullet_points(&generated)
    }

    fn backend(&self) -> &'static str {
        "hosted"
    }
}

/// Turns free-form model output into bullet points.
///
/// Glyph-prefixed lines (`•`, `-`, `*`) win, normalized to `"• "` and capped
/// at six. Without any, plain lines over 20 characters are taken (up to five).
pub fn parse_bullet_points(generated: &str) -> Result<OptimizationResult, AppError> {
    let lines: Vec<&str> = generated
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let bullets: Vec<String> = lines
        .iter()
        .filter(|line| line.starts_with(['•', '-', '*']))
        .take(MAX_BULLET_POINTS)
        .map(|line| format!("{BULLET_PREFIX}{}", strip_bullet(line)))
        .collect();

    if !bullets.is_empty() {
        let message = format!("Generated {} optimized bullet points!", bullets.len());
        return Ok(OptimizationResult::new(bullets, message));
    }

    let fallback: Vec<String> = lines
        .iter()
        .filter(|line| line.chars().count() > MIN_FALLBACK_LINE_CHARS)
        .take(MAX_FALLBACK_POINTS)
        .map(|line| format!("{BULLET_PREFIX}{line}"))
        .collect();

    if fallback.is_empty() {
        return Err(AppError::Optimization(NO_POINTS_MESSAGE.to_string()));
    }

    Ok(OptimizationResult::new(
        fallback,
        "Resume optimized successfully!",
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// LocalOptimizer
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-driven optimizer. Deterministic, no network call.
pub struct LocalOptimizer;

#[async_trait]
impl ResumeOptimizer for LocalOptimizer {
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, AppError> {
        let keywords = prioritize_keywords(&request.job_description, &request.master_resume);
        let points = synthesize_bullets(
            &request.master_resume,
            &keywords,
            &request.communication_style,
        );

        if points.is_empty() {
            return Err(AppError::Optimization(NO_POINTS_MESSAGE.to_string()));
        }

        info!(
            "Local optimizer produced {} points from {} keywords",
            points.len(),
            keywords.len()
        );
        let message = format!(
            "Generated {} optimized bullet points using keyword analysis!",
            points.len()
        );
        Ok(OptimizationResult::new(points, message))
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
