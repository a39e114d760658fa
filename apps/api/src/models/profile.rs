use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trimmed resume length above which the profile counts as configured.
pub const RESUME_READY_CHARS: usize = 100;
/// Trimmed style-sample length above which the profile counts as configured.
pub const STYLE_READY_CHARS: usize = 50;

/// The user's stored profile: master resume plus a writing-style sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub master_resume: String,
    pub communication_style: String,
    pub saved_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn resume_ready(&self) -> bool {
        self.master_resume.trim().chars().count() > RESUME_READY_CHARS
    }

    pub fn style_ready(&self) -> bool {
        self.communication_style.trim().chars().count() > STYLE_READY_CHARS
    }
}

/// Body of `PUT /api/profile`. `savedAt` is always stamped server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    #[serde(default)]
    pub master_resume: String,
    #[serde(default)]
    pub communication_style: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(resume: &str, style: &str) -> UserProfile {
        UserProfile {
            master_resume: resume.to_string(),
            communication_style: style.to_string(),
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let value = serde_json::to_value(profile("r", "s")).unwrap();
        assert_eq!(value["masterResume"], "r");
        assert_eq!(value["communicationStyle"], "s");
        assert!(value["savedAt"].is_string());
    }

    #[test]
    fn test_readiness_thresholds_use_trimmed_length() {
        let padded = format!("   {}   ", "x".repeat(100));
        let p = profile(&padded, &"y".repeat(50));
        assert!(!p.resume_ready(), "exactly 100 chars is not enough");
        assert!(!p.style_ready(), "exactly 50 chars is not enough");

        let p = profile(&"x".repeat(101), &"y".repeat(51));
        assert!(p.resume_ready());
        assert!(p.style_ready());
    }
}
