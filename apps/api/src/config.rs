use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::optimization::prompts::PromptVariant;

/// Default hosted model endpoint.
pub const DEFAULT_HF_API_URL: &str =
    "https://api-inference.huggingface.co/models/meta-llama/Meta-Llama-3.1-8B-Instruct";

/// Which optimizer serves `/api/optimize-resume`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerBackend {
    Hosted,
    Local,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_token: Option<String>,
    pub hf_api_url: String,
    pub hf_timeout_secs: Option<u64>,
    pub prompt_variant: PromptVariant,
    pub optimizer_backend: OptimizerBackend,
    pub profile_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let huggingface_token = optional_env("HUGGINGFACE_TOKEN");

        let prompt_variant = resolve_prompt_variant(optional_env("PROMPT_VARIANT").as_deref())?;
        let optimizer_backend = resolve_backend(
            huggingface_token.as_deref(),
            optional_env("OPTIMIZER_BACKEND").as_deref(),
        )?;

        let hf_timeout_secs = optional_env("HF_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .context("HF_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?;

        Ok(Config {
            huggingface_token,
            hf_api_url: optional_env("HF_API_URL").unwrap_or_else(|| DEFAULT_HF_API_URL.to_string()),
            hf_timeout_secs,
            prompt_variant,
            optimizer_backend,
            profile_path: optional_env("PROFILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("applyninja-profile.json")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn has_huggingface_token(&self) -> bool {
        self.huggingface_token.is_some()
    }
}

fn resolve_prompt_variant(raw: Option<&str>) -> Result<PromptVariant> {
    match raw {
        None | Some("llama3") => Ok(PromptVariant::Llama3Chat),
        Some("compact") => Ok(PromptVariant::Compact),
        Some(other) => bail!("PROMPT_VARIANT must be 'llama3' or 'compact', got '{other}'"),
    }
}

/// An explicit `OPTIMIZER_BACKEND` wins; otherwise hosted only with a token.
fn resolve_backend(token: Option<&str>, raw: Option<&str>) -> Result<OptimizerBackend> {
    match raw {
        Some("hosted") => Ok(OptimizerBackend::Hosted),
        Some("local") => Ok(OptimizerBackend::Local),
        None if token.is_some() => Ok(OptimizerBackend::Hosted),
        None => Ok(OptimizerBackend::Local),
        Some(other) => bail!("OPTIMIZER_BACKEND must be 'hosted' or 'local', got '{other}'"),
    }
}

/// Reads an env var, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults_follow_token() {
        assert_eq!(resolve_backend(Some("hf_x"), None).unwrap(), OptimizerBackend::Hosted);
        assert_eq!(resolve_backend(None, None).unwrap(), OptimizerBackend::Local);
    }

    #[test]
    fn test_backend_explicit_value_overrides_token() {
        assert_eq!(resolve_backend(Some("hf_x"), Some("local")).unwrap(), OptimizerBackend::Local);
        assert_eq!(resolve_backend(None, Some("hosted")).unwrap(), OptimizerBackend::Hosted);
    }

    #[test]
    fn test_unknown_backend_fails() {
        let err = resolve_backend(Some("hf_x"), Some("remote")).unwrap_err();
        assert!(err.to_string().contains("OPTIMIZER_BACKEND"));
    }

    #[test]
    fn test_prompt_variant_values() {
        assert_eq!(resolve_prompt_variant(None).unwrap(), PromptVariant::Llama3Chat);
        assert_eq!(resolve_prompt_variant(Some("llama3")).unwrap(), PromptVariant::Llama3Chat);
        assert_eq!(resolve_prompt_variant(Some("compact")).unwrap(), PromptVariant::Compact);
        let err = resolve_prompt_variant(Some("gpt")).unwrap_err();
        assert!(err.to_string().contains("PROMPT_VARIANT"));
    }
}
