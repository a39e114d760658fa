// Prompt templates for the hosted text-generation model.
// Each variant truncates the three inputs to its own caps before templating.

use crate::models::optimization::OptimizationRequest;

/// Which prompt shape the hosted model expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Llama 3 instruct chat template.
    Llama3Chat,
    /// Plain instruction prompt for smaller models with short context windows.
    Compact,
}

/// Per-field character caps applied before templating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCaps {
    pub job_description: usize,
    pub master_resume: usize,
    pub communication_style: usize,
}

impl PromptVariant {
    pub fn caps(&self) -> FieldCaps {
        match self {
            PromptVariant::Llama3Chat => FieldCaps {
                job_description: 2000,
                master_resume: 3000,
                communication_style: 1000,
            },
            PromptVariant::Compact => FieldCaps {
                job_description: 500,
                master_resume: 1000,
                communication_style: 1000,
            },
        }
    }

    fn template(&self) -> &'static str {
        match self {
            PromptVariant::Llama3Chat => LLAMA3_PROMPT_TEMPLATE,
            PromptVariant::Compact => COMPACT_PROMPT_TEMPLATE,
        }
    }

    /// Renders the prompt for one request.
    pub fn build_prompt(&self, request: &OptimizationRequest) -> String {
        let caps = self.caps();
        self.template()
            .replace(
                "{job_description}",
                truncate_chars(&request.job_description, caps.job_description),
            )
            .replace(
                "{master_resume}",
                truncate_chars(&request.master_resume, caps.master_resume),
            )
            .replace(
                "{communication_style}",
                truncate_chars(&request.communication_style, caps.communication_style),
            )
    }
}

/// Prefix of at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Llama 3 chat prompt. Replace: {job_description}, {master_resume}, {communication_style}
pub const LLAMA3_PROMPT_TEMPLATE: &str = r#"<|begin_of_text|><|start_header_id|>system<|end_header_id|>

You are an expert resume optimizer. Your task is to analyze a job description and rewrite key resume bullet points to better match the job requirements while maintaining the candidate's authentic communication style.

<|eot_id|><|start_header_id|>user<|end_header_id|>

**Job Description:**
{job_description}

**Master Resume:**
{master_resume}

**Communication Style Reference:**
{communication_style}

**Instructions:**
1. Extract 4-6 most relevant experiences from the master resume
2. Rewrite them to highlight skills/keywords mentioned in the job description
3. Maintain the candidate's communication style and tone
4. Focus on quantifiable achievements when possible
5. Each bullet point should start with a strong action verb

**Output only the optimized bullet points, one per line, starting with "•":**

<|eot_id|><|start_header_id|>assistant<|end_header_id|>"#;

/// Short-context prompt. Replace: {job_description}, {master_resume}, {communication_style}
pub const COMPACT_PROMPT_TEMPLATE: &str = r#"Rewrite resume bullet points to match a job.

Job: {job_description}

Resume: {master_resume}

Write like this: {communication_style}

Write 4-6 bullet points, one per line, each starting with "•" and a strong action verb:
"#;
