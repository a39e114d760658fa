//! Profile store — an injected handle over wherever the profile lives.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`. The file store backs the
//! running service; the memory store backs tests.

use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{SaveProfileRequest, UserProfile};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The stored profile, or `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<UserProfile>>;

    /// Replaces the stored profile.
    async fn store(&self, profile: &UserProfile) -> Result<()>;
}

/// Trims both fields, rejects empties, stamps `savedAt` and persists.
pub async fn save_profile(
    store: &dyn ProfileStore,
    request: SaveProfileRequest,
) -> Result<UserProfile, AppError> {
    let master_resume = request.master_resume.trim().to_string();
    let communication_style = request.communication_style.trim().to_string();

    if master_resume.is_empty() {
        return Err(AppError::Validation(
            "Please enter your master resume before saving.".to_string(),
        ));
    }
    if communication_style.is_empty() {
        return Err(AppError::Validation(
            "Please enter your communication style before saving.".to_string(),
        ));
    }

    let profile = UserProfile {
        master_resume,
        communication_style,
        saved_at: Utc::now(),
    };
    store.store(&profile).await?;
    info!("Profile saved successfully");
    Ok(profile)
}

// ────────────────────────────────────────────────────────────────────────────
// FileProfileStore
// ────────────────────────────────────────────────────────────────────────────

/// JSON file on local disk. A missing file means no profile yet.
///
/// Writers are serialized and each save lands through a rename of a sibling
/// temp file, so readers only ever see a complete profile.
pub struct FileProfileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self) -> Result<Option<UserProfile>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read profile from {}", self.path.display())
                })
            }
        };

        let profile = serde_json::from_slice(&bytes)
            .with_context(|| format!("Profile file {} is not valid JSON", self.path.display()))?;
        Ok(Some(profile))
    }

    async fn store(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_vec_pretty(profile)?;
        let temp = self.temp_path();

        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&temp, json)
            .await
            .with_context(|| format!("Failed to write profile to {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace profile at {}", self.path.display()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryProfileStore
// ────────────────────────────────────────────────────────────────────────────

/// In-process store; nothing survives a restart.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Default)]
pub struct MemoryProfileStore {
    profile: RwLock<Option<UserProfile>>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl MemoryProfileStore {
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self) -> Result<Option<UserProfile>> {
        let guard = self
            .profile
            .read()
            .map_err(|_| anyhow::anyhow!("profile lock poisoned"))?;
        Ok(guard.clone())
    }

    async fn store(&self, profile: &UserProfile) -> Result<()> {
        let mut guard = self
            .profile
            .write()
            .map_err(|_| anyhow::anyhow!("profile lock poisoned"))?;
        *guard = Some(profile.clone());
        Ok(())
    }
}
